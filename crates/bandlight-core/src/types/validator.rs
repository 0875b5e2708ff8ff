use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes in a validator address (Ethereum-style, keccak-derived).
pub const VALIDATOR_ADDRESS_LEN: usize = 20;

/// A validator's address: the rightmost 20 bytes of the keccak256 hash of
/// its uncompressed secp256k1 public key. Addresses order lexicographically,
/// which is what the relay engine's strictly-increasing signer check uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatorAddress(pub [u8; VALIDATOR_ADDRESS_LEN]);

impl ValidatorAddress {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        if bytes.len() != VALIDATOR_ADDRESS_LEN {
            return Err("Invalid validator address length");
        }
        let mut arr = [0u8; VALIDATOR_ADDRESS_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for ValidatorAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl<'de> Deserialize<'de> for ValidatorAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// One validator set entry: an address and its current voting power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorPower {
    pub address: ValidatorAddress,
    pub power: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_address_ordering_is_lexicographic() {
        let low = ValidatorAddress(hex!("3b759c4d728e50d5cc04c75f596367829d5b5061"));
        let high = ValidatorAddress(hex!("49897b9d617ad700b84a935616e81f9f4b5305bc"));
        assert!(low < high);
    }

    #[test]
    fn test_address_display_and_serde_round_trip() {
        let addr = ValidatorAddress(hex!("7054bd1fd7535a0dd552361e634196b1574594bb"));
        assert_eq!(addr.to_string(), "0x7054bd1fd7535a0dd552361e634196b1574594bb");

        let json = serde_json::to_string(&addr).unwrap();
        let back: ValidatorAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        assert!(ValidatorAddress::from_bytes(&[0u8; 19]).is_err());
        assert!(ValidatorAddress::from_bytes(&[0u8; 21]).is_err());
    }
}
