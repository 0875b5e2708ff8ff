//! Consensus layer: canonical vote reconstruction and signer recovery.

pub mod vote;

pub use vote::VoteError;
