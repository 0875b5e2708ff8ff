use serde::{Deserialize, Serialize};

/// The compacted Tendermint block header.
///
/// The full header has 14 fields; the bridge only ever needs to recompute
/// the tree around the three leaves it cares about (height, time, app hash),
/// so adjacent fields arrive pre-hashed into the opaque inner digests below.
/// Together with the app hash these reproduce the unique block hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderMerkleParts {
    /// inner(leaf(version), leaf(chain_id)); pinned per chain.
    #[serde(with = "crate::types::serde_hex32")]
    pub version_and_chain_id_hash: [u8; 32],
    /// Block height; hashed as a protobuf int64 leaf.
    pub height: u64,
    /// Block time, seconds part.
    pub time_second: u64,
    /// Block time, nanoseconds part.
    pub time_nano_second: u32,
    /// Subtree digest covering last_block_id .. validators_hash.
    #[serde(with = "crate::types::serde_hex32")]
    pub last_block_id_and_other: [u8; 32],
    /// inner(leaf(next_validators_hash), leaf(consensus_hash)).
    #[serde(with = "crate::types::serde_hex32")]
    pub next_validator_hash_and_consensus_hash: [u8; 32],
    /// leaf(last_results_hash), already leaf-wrapped by the relayer.
    #[serde(with = "crate::types::serde_hex32")]
    pub last_results_hash: [u8; 32],
    /// Subtree digest covering evidence_hash and proposer_address.
    #[serde(with = "crate::types::serde_hex32")]
    pub evidence_and_proposer_hash: [u8; 32],
}

/// The application (multistore) hash, decomposed around the oracle store.
///
/// BandChain's app hash is a simple Merkle tree over its module stores in
/// key order. Only the oracle store's IAVL root matters to the bridge; every
/// other store arrives as a precomputed subtree digest. The field layout
/// mirrors the chain's store map:
///
/// ```text
///                              ____________[AppHash]____________
///                             /                                 \
///                   _______[I14]_______                 staking..upgrade [E]
///                  /                   \
///        auth..feegrant [A]      ____[I13]____
///                               /             \
///                     gov..icahost [B]    __[I12]__
///                                        /         \
///                                     [I11]     params..slashing [D]
///                                    /     \
///                              mint [C]   oracle (computed leaf)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiStoreTree {
    /// [A] subtree over the auth..feegrant stores.
    #[serde(with = "crate::types::serde_hex32")]
    pub auth_to_fee_grant_stores_merkle_hash: [u8; 32],
    /// [B] subtree over the gov..icahost stores.
    #[serde(with = "crate::types::serde_hex32")]
    pub gov_to_icahost_stores_merkle_hash: [u8; 32],
    /// [C] the mint store leaf digest.
    #[serde(with = "crate::types::serde_hex32")]
    pub mint_store_merkle_hash: [u8; 32],
    /// The oracle store's IAVL root, the digest the relay engine persists
    /// and all oracle data proofs verify against.
    #[serde(with = "crate::types::serde_hex32")]
    pub oracle_iavl_state_hash: [u8; 32],
    /// [D] subtree over the params..slashing stores.
    #[serde(with = "crate::types::serde_hex32")]
    pub params_to_slashing_stores_merkle_hash: [u8; 32],
    /// [E] subtree over the staking..upgrade stores.
    #[serde(with = "crate::types::serde_hex32")]
    pub staking_to_upgrade_stores_merkle_hash: [u8; 32],
}
