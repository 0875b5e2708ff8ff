use crate::types::header::{BlockHeaderMerkleParts, MultiStoreTree};
use crate::types::oracle::ResultRecord;
use serde::{Deserialize, Serialize};

/// The portion of a canonical precommit vote that is identical for every
/// signer of one block: everything before and after the 32-byte block hash.
///
/// The prefix carries the vote type, height and round; the suffix carries
/// the part-set header. Both are opaque to the bridge except for their
/// lengths, which are pinned to the two valid protobuf encodings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonEncodedVotePart {
    #[serde(with = "crate::types::serde_hex")]
    pub signed_data_prefix: Vec<u8>,
    #[serde(with = "crate::types::serde_hex")]
    pub signed_data_suffix: Vec<u8>,
}

/// One validator's precommit signature over a block, plus the per-signer
/// timestamp that completes its canonical vote message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmSignature {
    #[serde(with = "crate::types::serde_hex32")]
    pub r: [u8; 32],
    #[serde(with = "crate::types::serde_hex32")]
    pub s: [u8; 32],
    /// Ethereum-style recovery id (27 or 28).
    pub v: u8,
    /// Protobuf-encoded vote timestamp, 6..=12 bytes.
    #[serde(with = "crate::types::serde_hex")]
    pub encoded_timestamp: Vec<u8>,
}

/// One step of a bottom-up IAVL inclusion proof. The subtree metadata is
/// hashed into the parent pre-image, not just used for routing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IavlMerklePathNode {
    /// Whether the running digest is the right child at this level.
    pub is_data_on_right: bool,
    pub subtree_height: u8,
    pub subtree_size: u64,
    pub subtree_version: u64,
    #[serde(with = "crate::types::serde_hex32")]
    pub sibling_hash: [u8; 32],
}

/// Everything needed to relay one block: the decomposed app hash, the
/// header parts, the shared vote encoding and the validator signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRelayProof {
    pub multi_store: MultiStoreTree,
    pub merkle_parts: BlockHeaderMerkleParts,
    pub common_encoded_vote_part: CommonEncodedVotePart,
    pub signatures: Vec<TmSignature>,
}

/// An inclusion proof for one oracle result against a relayed state root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleDataProof {
    /// Height of the relayed block whose oracle root anchors this proof.
    pub block_height: u64,
    pub result: ResultRecord,
    /// IAVL version of the leaf node holding the result.
    pub version: u64,
    /// Ordered leaf-to-root path.
    pub merkle_paths: Vec<IavlMerklePathNode>,
}

/// A combined relay-and-verify payload: prove the block, then prove the
/// result inside it, in one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullProof {
    pub block_relay: BlockRelayProof,
    pub oracle_data: OracleDataProof,
}
