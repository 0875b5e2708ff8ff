//! Merkle tree reconstruction for block relays and oracle data proofs.

pub mod hash;
pub mod header;
pub mod iavl;
pub mod multistore;

pub use hash::{inner_hash, keccak256, leaf_hash, sha256};
pub use iavl::{compute_oracle_root, result_leaf_hash};
