//! The relay engine: accepts signed block relays, persists oracle roots
//! per height and verifies oracle data proofs against them.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::consensus::vote::VoteError;
use crate::merkle::iavl::compute_oracle_root;
use crate::types::oracle::ResultRecord;
use crate::types::proof::{BlockRelayProof, FullProof, OracleDataProof};
use crate::types::validator::ValidatorPower;
use crate::validators::{ValidatorSet, ValidatorSetError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// Signers must arrive in strictly increasing address order; it makes
    /// duplicates impossible without a separate seen-set.
    #[error("signatures are not in strictly increasing signer order")]
    InvalidSignatureSignerOrder,
    #[error("signed power {signed} of {total} is below the 2/3 threshold")]
    InsufficientValidatorSignatures { signed: u64, total: u64 },
    #[error("height {height} already relayed with a different oracle root")]
    BlockRootConflict { height: u64 },
    #[error("no oracle root relayed for height {height}")]
    NoOracleRootStateData { height: u64 },
    #[error("oracle data proof does not reach the root at height {height}")]
    InvalidOracleDataProof { height: u64 },
    #[error("relay already in progress")]
    RelayInProgress,
    #[error(transparent)]
    Vote(#[from] VoteError),
    #[error(transparent)]
    ValidatorSet(#[from] ValidatorSetError),
}

/// A light-client bridge to one remote chain.
///
/// Holds the validator set, the per-height oracle roots accepted so far and
/// the pre-encoded chain id that every canonical vote embeds.
#[derive(Clone, Debug)]
pub struct Bridge {
    validators: ValidatorSet,
    oracle_states: BTreeMap<u64, [u8; 32]>,
    encoded_chain_id: Vec<u8>,
    relaying: bool,
}

impl Bridge {
    /// Builds a bridge trusting `initial_validators` on the chain whose id
    /// protobuf-encodes to `encoded_chain_id` (field 6 of CanonicalVote,
    /// tag byte included).
    pub fn new(initial_validators: Vec<ValidatorPower>, encoded_chain_id: Vec<u8>) -> Self {
        Self {
            validators: ValidatorSet::new(initial_validators),
            oracle_states: BTreeMap::new(),
            encoded_chain_id,
            relaying: false,
        }
    }

    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    pub fn validators_mut(&mut self) -> &mut ValidatorSet {
        &mut self.validators
    }

    /// The oracle root accepted at `height`, if any block was relayed there.
    pub fn oracle_state(&self, height: u64) -> Option<[u8; 32]> {
        self.oracle_states.get(&height).copied()
    }

    /// Verifies a signed block and persists its oracle root.
    ///
    /// The multistore and header parts pin the oracle root to a unique
    /// block hash; the signatures must recover to known validators holding
    /// more than two thirds of the total voting power. Relaying a height
    /// twice is a no-op when the root matches and an error when it does
    /// not, since a conflict means either a forged proof or a remote fork.
    pub fn relay_block(&mut self, proof: &BlockRelayProof) -> Result<(), BridgeError> {
        let app_hash = proof.multi_store.app_hash();
        let block_hash = proof.merkle_parts.block_hash(&app_hash);
        let common_vote = proof.common_encoded_vote_part.assemble(&block_hash)?;

        let mut signed_power: u64 = 0;
        let mut last_signer = None;
        for signature in &proof.signatures {
            let signer = signature.recover_signer(&common_vote, &self.encoded_chain_id)?;
            if let Some(previous) = last_signer {
                if signer <= previous {
                    return Err(BridgeError::InvalidSignatureSignerOrder);
                }
            }
            last_signer = Some(signer);
            signed_power += self.validators.power_of(&signer);
        }

        let total_power = self.validators.total_power();
        // Widened so 3x the signed power cannot wrap.
        if (signed_power as u128) * 3 < (total_power as u128) * 2 {
            return Err(BridgeError::InsufficientValidatorSignatures {
                signed: signed_power,
                total: total_power,
            });
        }

        let height = proof.merkle_parts.height;
        let oracle_root = proof.multi_store.oracle_iavl_state_hash;
        match self.oracle_states.get(&height) {
            Some(existing) if *existing != oracle_root => {
                Err(BridgeError::BlockRootConflict { height })
            }
            Some(_) => Ok(()),
            None => {
                self.oracle_states.insert(height, oracle_root);
                debug!(
                    height,
                    oracle_root = %hex::encode(oracle_root),
                    signed_power,
                    total_power,
                    "block relayed"
                );
                Ok(())
            }
        }
    }

    /// Checks one oracle result against the root relayed at the proof's
    /// height and returns the verified record.
    pub fn verify_oracle_data(
        &self,
        proof: &OracleDataProof,
    ) -> Result<ResultRecord, BridgeError> {
        let root = self
            .oracle_states
            .get(&proof.block_height)
            .ok_or(BridgeError::NoOracleRootStateData {
                height: proof.block_height,
            })?;
        let computed = compute_oracle_root(&proof.result, proof.version, &proof.merkle_paths);
        if computed != *root {
            return Err(BridgeError::InvalidOracleDataProof {
                height: proof.block_height,
            });
        }
        debug!(
            height = proof.block_height,
            request_id = proof.result.request_id,
            "oracle data verified"
        );
        Ok(proof.result.clone())
    }

    /// Relays a block and verifies one result against it in a single call.
    /// The call commits nothing unless both steps succeed: a root stored by
    /// the relay half is unwound when the data proof fails, leaving the
    /// bridge exactly as it was.
    pub fn relay_and_verify(&mut self, proof: &FullProof) -> Result<ResultRecord, BridgeError> {
        if self.relaying {
            return Err(BridgeError::RelayInProgress);
        }
        self.relaying = true;
        let height = proof.block_relay.merkle_parts.height;
        let had_root = self.oracle_states.contains_key(&height);
        let result = self
            .relay_block(&proof.block_relay)
            .and_then(|_| self.verify_oracle_data(&proof.oracle_data));
        if result.is_err() && !had_root {
            self.oracle_states.remove(&height);
        }
        self.relaying = false;
        result
    }
}
