//! Protobuf-style varint encoding shared by the Tendermint header tree,
//! the IAVL proof walker and the result codec. All outputs are the exact
//! bytes BandChain hashes over, so nothing here may deviate by a single bit.

/// Encode an unsigned integer as a LEB128 varint (protobuf wire format).
pub fn encode_varint_unsigned(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    while value >= 0x80 {
        out.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Encode a non-negative integer as a zigzag signed varint.
/// Tendermint/IAVL encode tree heights, sizes and versions this way;
/// they are never negative in valid trees, so zigzag reduces to `2n`.
pub fn encode_varint_signed(value: u64) -> Vec<u8> {
    encode_varint_unsigned(value << 1)
}

/// Encode a block time as a protobuf `google.protobuf.Timestamp`:
/// field 1 (seconds) always present, field 2 (nanos) omitted when zero.
pub fn encode_time(seconds: u64, nanos: u32) -> Vec<u8> {
    let mut out = vec![0x08];
    out.extend_from_slice(&encode_varint_unsigned(seconds));
    if nanos > 0 {
        out.push(0x10);
        out.extend_from_slice(&encode_varint_unsigned(u64::from(nanos)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_encode_varint_unsigned_vectors() {
        // Vectors from the BandChain bridge reference tests
        assert_eq!(encode_varint_unsigned(116), hex!("74"));
        assert_eq!(encode_varint_unsigned(14947), hex!("e374"));
        assert_eq!(encode_varint_unsigned(244939043), hex!("a3f2e574"));
    }

    #[test]
    fn test_encode_varint_signed_vectors() {
        assert_eq!(encode_varint_signed(58), hex!("74"));
        assert_eq!(encode_varint_signed(7473), hex!("e274"));
        assert_eq!(encode_varint_signed(122469521), hex!("a2f2e574"));
    }

    #[test]
    fn test_encode_time_vector() {
        assert_eq!(
            encode_time(1605781207, 476745924),
            hex!("08d78dd9fd0510c4a1aae301")
        );
    }

    #[test]
    fn test_encode_time_omits_zero_nanos() {
        let encoded = encode_time(1605781207, 0);
        assert_eq!(encoded[0], 0x08);
        assert!(!encoded.contains(&0x10));
    }

    #[test]
    fn test_encode_varint_single_byte_boundary() {
        assert_eq!(encode_varint_unsigned(0), vec![0x00]);
        assert_eq!(encode_varint_unsigned(127), vec![0x7F]);
        assert_eq!(encode_varint_unsigned(128), vec![0x80, 0x01]);
    }
}
