//! Canonical precommit reconstruction and signer recovery.
//!
//! Validators never sign the block hash directly; they sign a
//! length-prefixed protobuf CanonicalVote that embeds it. Relayers strip
//! the vote down to the bytes shared by every signer (the common part) and
//! per-signer timestamps, and we rebuild each signed message here to
//! recover the secp256k1 key behind each signature.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use thiserror::Error;

use crate::merkle::hash::{keccak256, sha256};
use crate::types::proof::{CommonEncodedVotePart, TmSignature};
use crate::types::validator::ValidatorAddress;

/// A CanonicalVote for a precommit starts with the vote type and round
/// fields, then the block id. The prefix is 15 bytes when the round is
/// zero (the round field is omitted) and 24 bytes otherwise.
const PREFIX_SIZE_NO_ROUND: usize = 15;
const PREFIX_SIZE_WITH_ROUND: usize = 24;

/// Block id part id, part count and the parts hash: always 38 bytes.
const SUFFIX_SIZE: usize = 38;

/// A protobuf Timestamp with seconds alone takes 6 bytes; with nanoseconds
/// it grows to at most 12.
const TIMESTAMP_SIZE_MIN: usize = 6;
const TIMESTAMP_SIZE_MAX: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("signed data prefix must be {PREFIX_SIZE_NO_ROUND} or {PREFIX_SIZE_WITH_ROUND} bytes, got {len}")]
    InvalidSignedDataPrefix { len: usize },
    #[error("signed data suffix must be {SUFFIX_SIZE} bytes, got {len}")]
    InvalidSignedDataSuffix { len: usize },
    #[error("encoded timestamp must be {TIMESTAMP_SIZE_MIN}..={TIMESTAMP_SIZE_MAX} bytes, got {len}")]
    InvalidTimestamp { len: usize },
    #[error("recovery id must be 27 or 28, got {v}")]
    InvalidRecoveryId { v: u8 },
    #[error("signature does not recover to a valid secp256k1 key")]
    SignatureRecovery,
}

impl CommonEncodedVotePart {
    /// Splices the block hash into the vote bytes shared by all signers.
    pub fn assemble(&self, block_hash: &[u8; 32]) -> Result<Vec<u8>, VoteError> {
        if self.signed_data_prefix.len() != PREFIX_SIZE_NO_ROUND
            && self.signed_data_prefix.len() != PREFIX_SIZE_WITH_ROUND
        {
            return Err(VoteError::InvalidSignedDataPrefix {
                len: self.signed_data_prefix.len(),
            });
        }
        if self.signed_data_suffix.len() != SUFFIX_SIZE {
            return Err(VoteError::InvalidSignedDataSuffix {
                len: self.signed_data_suffix.len(),
            });
        }
        let mut common =
            Vec::with_capacity(self.signed_data_prefix.len() + 32 + self.signed_data_suffix.len());
        common.extend_from_slice(&self.signed_data_prefix);
        common.extend_from_slice(block_hash);
        common.extend_from_slice(&self.signed_data_suffix);
        Ok(common)
    }
}

impl TmSignature {
    /// Recovers the Ethereum-style address of the validator who produced
    /// this signature over the vote built from `common_vote` and this
    /// signature's own timestamp.
    pub fn recover_signer(
        &self,
        common_vote: &[u8],
        encoded_chain_id: &[u8],
    ) -> Result<ValidatorAddress, VoteError> {
        let message = self.signed_message(common_vote, encoded_chain_id)?;
        let digest = sha256(&message);

        let recovery_id = self
            .v
            .checked_sub(27)
            .and_then(RecoveryId::from_byte)
            .ok_or(VoteError::InvalidRecoveryId { v: self.v })?;
        let signature = Signature::from_scalars(self.r, self.s)
            .map_err(|_| VoteError::SignatureRecovery)?;
        let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
            .map_err(|_| VoteError::SignatureRecovery)?;

        // keccak of the 64-byte uncompressed point, low 20 bytes.
        let point = key.to_encoded_point(false);
        let hash = keccak256(&point.as_bytes()[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Ok(ValidatorAddress(address))
    }

    /// The exact bytes this validator signed: a one-byte total length,
    /// the common vote part, the timestamp as protobuf field 5 and the
    /// pre-encoded chain id field.
    fn signed_message(
        &self,
        common_vote: &[u8],
        encoded_chain_id: &[u8],
    ) -> Result<Vec<u8>, VoteError> {
        let ts_len = self.encoded_timestamp.len();
        if !(TIMESTAMP_SIZE_MIN..=TIMESTAMP_SIZE_MAX).contains(&ts_len) {
            return Err(VoteError::InvalidTimestamp { len: ts_len });
        }
        let total = common_vote.len() + ts_len + 2 + encoded_chain_id.len();
        let mut message = Vec::with_capacity(1 + total);
        message.push(total as u8);
        message.extend_from_slice(common_vote);
        message.push(0x2a);
        message.push(ts_len as u8);
        message.extend_from_slice(&self.encoded_timestamp);
        message.extend_from_slice(encoded_chain_id);
        Ok(message)
    }
}
