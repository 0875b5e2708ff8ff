//! IAVL tree verification for the oracle store.
//!
//! Oracle results live in a versioned AVL tree keyed by request id. Unlike
//! the Tendermint simple tree, IAVL node hashes are plain sha256 over an
//! amino-style pre-image carrying the node's height, size and version as
//! zigzag varints. There is no leaf/inner domain byte; the height field
//! plays that role (0 for leaves, positive for inner nodes).

use crate::codec::result::encode_result;
use crate::codec::varint::{encode_varint_signed, encode_varint_unsigned};
use crate::merkle::hash::sha256;
use crate::types::oracle::ResultRecord;
use crate::types::proof::IavlMerklePathNode;

/// Oracle store keys are the request id tagged with a result-row prefix.
const RESULT_KEY_PREFIX: u8 = 0xff;

impl IavlMerklePathNode {
    /// Hashes one step upward, placing `current` on the side this node says
    /// the data sits on and the stored sibling on the other.
    pub fn parent_hash(&self, current: &[u8; 32]) -> [u8; 32] {
        let (left, right) = if self.is_data_on_right {
            (&self.sibling_hash, current)
        } else {
            (current, &self.sibling_hash)
        };
        let mut buf = Vec::with_capacity(80);
        buf.extend_from_slice(&encode_varint_signed(self.subtree_height as u64));
        buf.extend_from_slice(&encode_varint_signed(self.subtree_size));
        buf.extend_from_slice(&encode_varint_signed(self.subtree_version));
        buf.push(0x20);
        buf.extend_from_slice(left);
        buf.push(0x20);
        buf.extend_from_slice(right);
        sha256(&buf)
    }
}

/// Hashes the leaf node storing `record` at tree `version`.
///
/// Leaf pre-image: height 0, size 1, the node version, the length-prefixed
/// store key and the sha256 of the protobuf-encoded result as the value
/// hash.
pub fn result_leaf_hash(record: &ResultRecord, version: u64) -> [u8; 32] {
    let key = result_store_key(record.request_id);
    let value_hash = sha256(&encode_result(record));

    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&encode_varint_signed(0));
    buf.extend_from_slice(&encode_varint_signed(1));
    buf.extend_from_slice(&encode_varint_signed(version));
    buf.extend_from_slice(&encode_varint_unsigned(key.len() as u64));
    buf.extend_from_slice(&key);
    buf.push(0x20);
    buf.extend_from_slice(&value_hash);
    sha256(&buf)
}

/// Walks a Merkle path from the result leaf up to the candidate root.
pub fn compute_oracle_root(
    record: &ResultRecord,
    version: u64,
    merkle_paths: &[IavlMerklePathNode],
) -> [u8; 32] {
    let mut current = result_leaf_hash(record, version);
    for node in merkle_paths {
        current = node.parent_hash(&current);
    }
    current
}

fn result_store_key(request_id: u64) -> [u8; 9] {
    let mut key = [0u8; 9];
    key[0] = RESULT_KEY_PREFIX;
    key[1..].copy_from_slice(&request_id.to_be_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_parent_hash_data_on_left() {
        let node = IavlMerklePathNode {
            is_data_on_right: false,
            subtree_height: 1,
            subtree_size: 2,
            subtree_version: 436,
            sibling_hash: hex!(
                "6763EDF42C0D7A3765E8CD9B970AE0E20DC6D3CF5DF0DC63CAD2C85FAFC6A803"
            ),
        };
        let current = hex!("22AA109AFDA802E032EB0D4755090E67237F421DDCD5F2491128CB7768EA17A9");
        assert_eq!(
            node.parent_hash(&current),
            hex!("9CE895E70AEB8767D86B7D80C03B0DE7C6F03422E0A6050B474C737D272ABE2B")
        );
    }

    fn fixture_record() -> ResultRecord {
        ResultRecord {
            client_id: "from_scan".to_string(),
            oracle_script_id: 1,
            params: hex!("0000000342544300000000000f4240").to_vec(),
            ask_count: 1,
            min_count: 1,
            request_id: 1,
            ans_count: 1,
            request_time: 1622111198,
            resolve_time: 1622111200,
            resolve_status: 1,
            result: hex!("000000092b6826f2").to_vec(),
        }
    }

    fn fixture_paths() -> Vec<IavlMerklePathNode> {
        let nodes = [
            (1u8, 2u64, 1007u64, hex!("EB739BB22F48B7F3053A90BA2BA4FE07FAB262CADF8664489565C50FF505B8BD")),
            (2, 4, 1007, hex!("BF32F8B214E4C36170D09B5125395C4EF1ABFA26583E676EF79AA3BA20A535A4")),
            (3, 6, 1007, hex!("F732D5B5007633C64B77F6CCECF01ECAB2537501D28ED623B6EC97DA4C1C6005")),
            (4, 10, 1007, hex!("F054C5E2412E1519951DBD7A60E2C5EDE41BABA494A6AF6FD0B0BAC4A4695C41")),
            (5, 20, 3417, hex!("FFA5A376D4DCA03596020A9A256DF9B73FE42ADEF285DD0ABE7E89A9819144EF")),
        ];
        nodes
            .into_iter()
            .map(|(height, size, version, sibling_hash)| IavlMerklePathNode {
                is_data_on_right: true,
                subtree_height: height,
                subtree_size: size,
                subtree_version: version,
                sibling_hash,
            })
            .collect()
    }

    // A result stored at version 1007, proven against the oracle root of
    // block 3417 on band-laozi-testnet1.
    #[test]
    fn test_compute_oracle_root_laozi_testnet() {
        assert_eq!(
            compute_oracle_root(&fixture_record(), 1007, &fixture_paths()),
            hex!("7920D562EC07A9979286FDCDA975F943D41D31974B01B8DC5B1B374878B194DA")
        );
    }

    #[test]
    fn test_tampered_result_moves_the_root() {
        let mut record = fixture_record();
        record.result = hex!("000000092b6826f3").to_vec();
        assert_ne!(
            compute_oracle_root(&record, 1007, &fixture_paths()),
            hex!("7920D562EC07A9979286FDCDA975F943D41D31974B01B8DC5B1B374878B194DA")
        );
    }
}
