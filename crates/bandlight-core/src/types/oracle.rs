use serde::{Deserialize, Serialize};

/// Request was resolved successfully.
pub const RESOLVE_STATUS_SUCCESS: u64 = 1;
/// Request failed during resolution (no result payload).
pub const RESOLVE_STATUS_FAILURE: u64 = 2;
/// Request expired before enough reports arrived.
pub const RESOLVE_STATUS_EXPIRED: u64 = 3;

/// A resolved oracle request as committed into BandChain's oracle store.
///
/// This is simultaneously the payload proven by IAVL inclusion proofs and
/// the input to the deterministic result encoder: the Merkle leaf commits
/// to `sha256(encode_result(record))`, so the field set and their protobuf
/// field numbers are fixed by the remote chain and must never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Caller-chosen identifier echoed back in the result.
    pub client_id: String,
    /// The oracle script that resolved this request.
    pub oracle_script_id: u64,
    /// OBI-encoded request parameters.
    #[serde(with = "crate::types::serde_hex")]
    pub params: Vec<u8>,
    /// Number of validators asked to report.
    pub ask_count: u64,
    /// Minimum number of reports required to resolve.
    pub min_count: u64,
    /// The request's sequence number, also the tail of the oracle store
    /// key this record lives under, so it is part of the proof.
    pub request_id: u64,
    /// Number of validators that actually reported.
    pub ans_count: u64,
    /// Unix time the request was created.
    pub request_time: u64,
    /// Unix time the request was resolved.
    pub resolve_time: u64,
    /// One of the `RESOLVE_STATUS_*` values.
    pub resolve_status: u64,
    /// OBI-encoded oracle script output; empty unless resolution succeeded.
    #[serde(with = "crate::types::serde_hex")]
    pub result: Vec<u8>,
}
