//! Hash primitives for the two Merkle constructions the bridge walks:
//! Tendermint's simple tree (domain-separated sha256) and Ethereum-style
//! keccak addresses for recovered signers.

use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// Plain SHA256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Tendermint simple-tree leaf: `sha256(0x00 ++ data)`.
/// The 0x00/0x01 prefixes domain-separate leaves from inner nodes so a
/// crafted inner pre-image can never collide with a leaf.
pub fn leaf_hash(data: &[u8]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(0x00);
    buf.extend_from_slice(data);
    sha256(&buf)
}

/// Tendermint simple-tree inner node: `sha256(0x01 ++ left ++ right)`.
pub fn inner_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut buf = [0u8; 65];
    buf[0] = 0x01;
    buf[1..33].copy_from_slice(left);
    buf[33..].copy_from_slice(right);
    sha256(&buf)
}

/// keccak256, used only for deriving signer addresses from recovered keys.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_leaf_hash_vector() {
        assert_eq!(
            leaf_hash(&hex!(
                "08d1082cc8d85a0833da8815ff1574675c415760e0aff7fb4e32de6de27faf86"
            )),
            hex!("35b401b2a74452d2252df60574e0a6c029885965ae48f006ebddc18e53427e26")
        );
    }

    #[test]
    fn test_inner_hash_vector() {
        assert_eq!(
            inner_hash(
                &hex!("08d1082cc8d85a0833da8815ff1574675c415760e0aff7fb4e32de6de27faf86"),
                &hex!("789411d15a12768a9c3eb99d3453d6ebb4481c2a03ab59cc262a97e25757afe6"),
            ),
            hex!("ca48b611419f0848bf0fce9750caca6fd4fb8ef96ba8d7d3ccd4f05bf2af1661")
        );
    }

    #[test]
    fn test_leaf_and_inner_domains_differ() {
        let a = [0xAAu8; 32];
        let b = [0xBBu8; 32];
        let mut concat = Vec::new();
        concat.extend_from_slice(&a);
        concat.extend_from_slice(&b);
        assert_ne!(inner_hash(&a, &b), leaf_hash(&concat));
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            keccak256(&[]),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }
}
