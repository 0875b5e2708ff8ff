//! Block hash recomputation from compacted header parts.

use crate::codec::varint::{encode_time, encode_varint_unsigned};
use crate::merkle::hash::{inner_hash, leaf_hash};
use crate::types::header::BlockHeaderMerkleParts;

impl BlockHeaderMerkleParts {
    /// Recomputes the Tendermint block hash committing to `app_hash`.
    ///
    /// The 14 header fields form a simple Merkle tree. Height, time and the
    /// app hash are hashed as protobuf-encoded leaves here; everything else
    /// comes in as the precomputed subtree digests carried by this struct.
    pub fn block_hash(&self, app_hash: &[u8; 32]) -> [u8; 32] {
        // Leaf [2]: the height as a protobuf varint field.
        let mut height_encoded = vec![0x08];
        height_encoded.extend_from_slice(&encode_varint_unsigned(self.height));
        let height_leaf = leaf_hash(&height_encoded);

        // Leaf [3]: the block time as a protobuf Timestamp.
        let time_leaf = leaf_hash(&encode_time(self.time_second, self.time_nano_second));

        // Leaf [A]: the app hash as a protobuf length-delimited bytes field.
        let mut app_encoded = Vec::with_capacity(34);
        app_encoded.push(0x0a);
        app_encoded.push(0x20);
        app_encoded.extend_from_slice(app_hash);
        let app_hash_leaf = leaf_hash(&app_encoded);

        let left = inner_hash(
            &inner_hash(
                &self.version_and_chain_id_hash,
                &inner_hash(&height_leaf, &time_leaf),
            ),
            &self.last_block_id_and_other,
        );
        let right = inner_hash(
            &inner_hash(
                &self.next_validator_hash_and_consensus_hash,
                &inner_hash(&app_hash_leaf, &self.last_results_hash),
            ),
            &self.evidence_and_proposer_hash,
        );
        inner_hash(&left, &right)
    }
}
