//! # Bandlight Core
//!
//! Pure Rust light-client verification for BandChain oracle data.
//!
//! This crate contains **no networking code**. It is the cryptographic
//! heart of Bandlight — every oracle result passes through these
//! verification functions before being trusted.
//!
//! ## Trust Model
//!
//! - **Block relay** (`bridge` + `consensus` modules): Recovers the
//!   secp256k1 signers of Tendermint precommit votes and accepts a block
//!   once validators holding more than 2/3 of the tracked voting power
//!   have signed it (the same assumption BandChain itself makes).
//!
//! - **Oracle data verification** (`merkle` module): Walks an IAVL
//!   inclusion proof from a result record up to the relayed oracle store
//!   root. Zero trust assumptions beyond the relayed root.
//!
//! ## Usage
//!
//! ```ignore
//! use bandlight_core::{Bridge, FullProof};
//!
//! let mut bridge = Bridge::new(initial_validators, encoded_chain_id);
//! let record = bridge.relay_and_verify(&proof)?;
//! ```

pub mod bridge;
pub mod codec;
pub mod consensus;
pub mod merkle;
pub mod types;
pub mod validators;

// Re-export commonly used types for convenience
pub use bridge::{Bridge, BridgeError};
pub use codec::{ObiDecoder, ObiEncoder, ObiError};
pub use consensus::vote::VoteError;
pub use types::{
    header::{BlockHeaderMerkleParts, MultiStoreTree},
    oracle::ResultRecord,
    proof::{
        BlockRelayProof, CommonEncodedVotePart, FullProof, IavlMerklePathNode, OracleDataProof,
        TmSignature,
    },
    validator::{ValidatorAddress, ValidatorPower},
};
pub use validators::{ValidatorSet, ValidatorSetError};
