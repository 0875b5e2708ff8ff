//! OBI (Oracle Binary Interface), BandChain's deterministic parameter codec.
//!
//! Fixed-width big-endian integers, 4-byte-length-prefixed strings and byte
//! strings, consumed strictly in field declaration order. Oracle scripts
//! declare their own schemas, so the decoder is a typed cursor rather than a
//! fixed struct: callers read fields in the order their schema declares them.

use thiserror::Error;

/// Errors during OBI decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObiError {
    #[error("OBI: out of range, needed {needed} more bytes with only {remaining} remaining")]
    OutOfRange { needed: usize, remaining: usize },

    #[error("OBI: {trailing} unconsumed trailing bytes after final field")]
    TrailingBytes { trailing: usize },

    #[error("OBI: string field is not valid UTF-8")]
    InvalidUtf8,
}

/// A cursor over an OBI-encoded byte string.
/// Every read either consumes exactly the declared width or fails with
/// `OutOfRange` leaving no partial result.
pub struct ObiDecoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ObiDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ObiError> {
        let remaining = self.data.len() - self.offset;
        if remaining < len {
            return Err(ObiError::OutOfRange {
                needed: len,
                remaining,
            });
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn decode_u8(&mut self) -> Result<u8, ObiError> {
        Ok(self.take(1)?[0])
    }

    pub fn decode_u16(&mut self) -> Result<u16, ObiError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn decode_u32(&mut self) -> Result<u32, ObiError> {
        let bytes = self.take(4)?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        Ok(u32::from_be_bytes(arr))
    }

    pub fn decode_u64(&mut self) -> Result<u64, ObiError> {
        let bytes = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(arr))
    }

    /// Length-prefixed byte string: 4-byte big-endian length, then payload.
    pub fn decode_bytes(&mut self) -> Result<Vec<u8>, ObiError> {
        let len = self.decode_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    pub fn decode_string(&mut self) -> Result<String, ObiError> {
        let bytes = self.decode_bytes()?;
        String::from_utf8(bytes).map_err(|_| ObiError::InvalidUtf8)
    }

    /// Require that every input byte was consumed.
    pub fn finish(&self) -> Result<(), ObiError> {
        let trailing = self.data.len() - self.offset;
        if trailing != 0 {
            return Err(ObiError::TrailingBytes { trailing });
        }
        Ok(())
    }
}

/// The write-side counterpart. Encoding then decoding with matching schemas
/// round-trips exactly; the output is deterministic byte-for-byte.
#[derive(Default)]
pub struct ObiEncoder {
    out: Vec<u8>,
}

impl ObiEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode_u8(mut self, value: u8) -> Self {
        self.out.push(value);
        self
    }

    pub fn encode_u16(mut self, value: u16) -> Self {
        self.out.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn encode_u32(mut self, value: u32) -> Self {
        self.out.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn encode_u64(mut self, value: u64) -> Self {
        self.out.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn encode_bytes(mut self, value: &[u8]) -> Self {
        self.out.extend_from_slice(&(value.len() as u32).to_be_bytes());
        self.out.extend_from_slice(value);
        self
    }

    pub fn encode_string(self, value: &str) -> Self {
        self.encode_bytes(value.as_bytes())
    }

    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}
