//! # Message Digest — 32-Byte Keccak Digest Newtype
//!
//! Defines `MessageDigest`, the 32-byte digest type that the signing
//! protocol is built on. Digests are produced exclusively by the Keccak
//! entry points in `onrelay-crypto`, which in turn accept only
//! [`WireBytes`](crate::wire::WireBytes) — so every digest in the system
//! descends from a vetted message layout.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::hex;

/// A 32-byte message digest.
///
/// Carries no algorithm tag: the protocol uses Keccak-256 exclusively, and
/// the digest pipeline (layout hash, instruction re-hash, personal-message
/// wrap) is fixed by the message schema.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageDigest(pub [u8; 32]);

impl MessageDigest {
    /// Create a digest from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a digest from a 64-character hex string (optional `0x`
    /// prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, CoreError> {
        Ok(Self(hex::decode_fixed::<32>(hex_str, "message digest")?))
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Debug for MessageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MessageDigest({})", self.to_hex())
    }
}

impl std::fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for MessageDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MessageDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let digest = MessageDigest::from_bytes([0x42; 32]);
        let hex_str = digest.to_hex();
        assert_eq!(hex_str.len(), 64);
        assert_eq!(MessageDigest::from_hex(&hex_str).unwrap(), digest);
    }

    #[test]
    fn test_display_prefixed() {
        let digest = MessageDigest::from_bytes([0u8; 32]);
        assert_eq!(digest.to_string().len(), 66);
        assert!(digest.to_string().starts_with("0x"));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(MessageDigest::from_hex("0xabcd").is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let digest = MessageDigest::from_bytes([0x11; 32]);
        let json = serde_json::to_string(&digest).unwrap();
        let parsed: MessageDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }
}
