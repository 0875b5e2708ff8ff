//! Application hash recomputation from the decomposed multistore tree.

use crate::merkle::hash::{inner_hash, leaf_hash, sha256};
use crate::types::header::MultiStoreTree;

impl MultiStoreTree {
    /// Recomputes the app hash committing to the oracle store's IAVL root.
    ///
    /// The oracle store's leaf hashes the store name ("oracle") together
    /// with the sha256 of its IAVL root, then folds upward through the
    /// sibling digests in store-key order. See the type docs for the tree
    /// layout each digest occupies.
    pub fn app_hash(&self) -> [u8; 32] {
        let mut oracle_store = Vec::with_capacity(40);
        oracle_store.push(0x06);
        oracle_store.extend_from_slice(b"oracle");
        oracle_store.push(0x20);
        oracle_store.extend_from_slice(&sha256(&self.oracle_iavl_state_hash));
        let oracle_leaf = leaf_hash(&oracle_store);

        let node = inner_hash(&self.mint_store_merkle_hash, &oracle_leaf);
        let node = inner_hash(&node, &self.params_to_slashing_stores_merkle_hash);
        let node = inner_hash(&self.gov_to_icahost_stores_merkle_hash, &node);
        let node = inner_hash(&self.auth_to_fee_grant_stores_merkle_hash, &node);
        inner_hash(&node, &self.staking_to_upgrade_stores_merkle_hash)
    }
}
