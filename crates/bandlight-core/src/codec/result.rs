//! Deterministic protobuf encoding of [`ResultRecord`].
//!
//! The IAVL leaf for a resolved request commits to `sha256` of exactly these
//! bytes, so this encoder mirrors proto3 canonical output: fields in
//! ascending field-number order, default values (zero integers, empty
//! strings/bytes) omitted entirely.

use crate::codec::varint::encode_varint_unsigned;
use crate::types::oracle::ResultRecord;

const WIRE_VARINT: u64 = 0;
const WIRE_LENGTH_DELIMITED: u64 = 2;

fn tag(field_number: u64, wire_type: u64) -> Vec<u8> {
    encode_varint_unsigned(field_number << 3 | wire_type)
}

fn put_uint(out: &mut Vec<u8>, field_number: u64, value: u64) {
    if value == 0 {
        return;
    }
    out.extend_from_slice(&tag(field_number, WIRE_VARINT));
    out.extend_from_slice(&encode_varint_unsigned(value));
}

fn put_bytes(out: &mut Vec<u8>, field_number: u64, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    out.extend_from_slice(&tag(field_number, WIRE_LENGTH_DELIMITED));
    out.extend_from_slice(&encode_varint_unsigned(value.len() as u64));
    out.extend_from_slice(value);
}

/// Encode a result record into the exact byte string BandChain stores.
/// Identical records always produce identical bytes.
pub fn encode_result(record: &ResultRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(64 + record.params.len() + record.result.len());
    put_bytes(&mut out, 1, record.client_id.as_bytes());
    put_uint(&mut out, 2, record.oracle_script_id);
    put_bytes(&mut out, 3, &record.params);
    put_uint(&mut out, 4, record.ask_count);
    put_uint(&mut out, 5, record.min_count);
    put_uint(&mut out, 6, record.request_id);
    put_uint(&mut out, 7, record.ans_count);
    put_uint(&mut out, 8, record.request_time);
    put_uint(&mut out, 9, record.resolve_time);
    put_uint(&mut out, 10, record.resolve_status);
    put_bytes(&mut out, 11, &record.result);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn record(
        client_id: &str,
        request_id: u64,
        ans_count: u64,
        request_time: u64,
        resolve_time: u64,
        resolve_status: u64,
        result: &[u8],
    ) -> ResultRecord {
        ResultRecord {
            client_id: client_id.to_string(),
            oracle_script_id: 1,
            params: hex!("0000000342544300000000000003e8").to_vec(),
            ask_count: 1,
            min_count: 1,
            request_id,
            ans_count,
            request_time,
            resolve_time,
            resolve_status,
            result: result.to_vec(),
        }
    }

    #[test]
    fn test_encode_result_vector() {
        let encoded = encode_result(&record(
            "beeb",
            2,
            1,
            1591622616,
            1591622618,
            1,
            &hex!("00000000009443ee"),
        ));
        assert_eq!(
            encoded,
            hex!(
                "0a046265656210011a0f0000000342544300000000000003e82001280130023801\
                 40d8f7f8f60548daf7f8f60550015a0800000000009443ee"
            )
        );
    }

    #[test]
    fn test_encode_result_omits_empty_client_id() {
        // clientID = "" drops field 1 entirely; the output starts at field 2
        let encoded = encode_result(&record(
            "",
            1,
            1,
            1591622426,
            1591622429,
            1,
            &hex!("0000000000944387"),
        ));
        assert_eq!(
            encoded,
            hex!(
                "10011a0f0000000342544300000000000003e82001280130013801409af6f8f605\
                 489df6f8f60550015a080000000000944387"
            )
        );
    }

    #[test]
    fn test_encode_result_omits_empty_result_bytes() {
        // A failed request carries no result payload; field 11 is omitted
        let encoded = encode_result(&record(
            "client_id",
            1,
            1,
            1591622426,
            1591622429,
            2,
            &[],
        ));
        assert_eq!(
            encoded,
            hex!(
                "0a09636c69656e745f696410011a0f0000000342544300000000000003e8200128\
                 0130013801409af6f8f605489df6f8f6055002"
            )
        );
    }

    #[test]
    fn test_encode_result_deterministic() {
        let r = record("beeb", 2, 1, 1591622616, 1591622618, 1, &[0xAB]);
        assert_eq!(encode_result(&r), encode_result(&r));
    }
}
