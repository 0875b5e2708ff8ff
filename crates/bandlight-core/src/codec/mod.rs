//! Binary codecs: OBI for oracle script payloads, protobuf-compatible
//! varints and result records for hashing.

pub mod obi;
pub mod result;
pub mod varint;

pub use obi::{ObiDecoder, ObiEncoder, ObiError};
pub use result::encode_result;
