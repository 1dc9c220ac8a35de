//! # Hex Encoding Utilities
//!
//! Lowercase hex encoding and decoding for the byte-array newtypes.
//! Decoding accepts an optional `0x` prefix; encoding never emits one
//! except through the `Display` impls that choose to.

use crate::error::CoreError;

/// Encode bytes as a lowercase hex string (no prefix).
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string, tolerating an optional `0x` prefix and
/// surrounding whitespace.
pub fn decode(hex: &str) -> Result<Vec<u8>, CoreError> {
    let hex = hex.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() % 2 != 0 {
        return Err(CoreError::InvalidHex(
            "hex string must have even length".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CoreError::InvalidHex(format!("invalid hex at position {i}: {e}")))
        })
        .collect()
}

/// Decode a hex string into a fixed-size byte array.
pub fn decode_fixed<const N: usize>(hex: &str, what: &'static str) -> Result<[u8; N], CoreError> {
    let bytes = decode(hex)?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CoreError::InvalidLength { what, expected: N, got })
}

/// Serde adapter serializing a 32-byte array as a lowercase hex string.
///
/// Use with `#[serde(with = "onrelay_core::hex::hex32")]`.
pub mod hex32 {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize the array as lowercase hex.
    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(bytes))
    }

    /// Deserialize the array from a hex string (optional `0x` prefix).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let hex = String::deserialize(deserializer)?;
        super::decode_fixed::<32>(&hex, "32-byte value").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lowercase() {
        assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_decode_with_prefix() {
        assert_eq!(decode("0xDEADBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_decode_odd_length_rejected() {
        assert!(decode("abc").is_err());
    }

    #[test]
    fn test_decode_non_hex_rejected() {
        assert!(decode("zzzz").is_err());
    }

    #[test]
    fn test_decode_fixed_wrong_length() {
        let err = decode_fixed::<4>("abcd", "test value").unwrap_err();
        match err {
            CoreError::InvalidLength { expected, got, .. } => {
                assert_eq!(expected, 4);
                assert_eq!(got, 2);
            }
            other => panic!("expected InvalidLength, got: {other:?}"),
        }
    }

    #[test]
    fn test_roundtrip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }
}
