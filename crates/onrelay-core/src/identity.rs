//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier kinds the escrow protocol moves
//! around. These prevent accidental identifier confusion — you cannot pass
//! a `TradeId` where an `Address` is expected, and neither is ever a bare
//! byte slice.
//!
//! ## Serde
//!
//! Both types serialize as lowercase hex strings. Deserialization accepts
//! an optional `0x` prefix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::CoreError;
use crate::hex;

/// A 16-byte opaque trade identifier, caller-supplied at escrow creation
/// and globally unique across the ledger's lifetime.
///
/// The engine never mints identifiers; [`TradeId::random()`] exists for
/// tooling and tests and draws a v4 UUID (itself a 16-byte value).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TradeId(pub [u8; 16]);

/// A 20-byte party identity: seller, buyer, relayer, fee recipient,
/// arbitrator, or the token contract a trade settles in.
///
/// Derived from a secp256k1 public key as the trailing 20 bytes of the
/// key's Keccak-256 digest (see `onrelay-crypto`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

// ---------------------------------------------------------------------------
// TradeId impls
// ---------------------------------------------------------------------------

impl TradeId {
    /// Create a trade identifier from raw 16 bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Return the raw 16-byte identifier.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Generate a random trade identifier (v4 UUID bytes).
    pub fn random() -> Self {
        Self(Uuid::new_v4().into_bytes())
    }

    /// Parse a trade identifier from a 32-character hex string
    /// (optional `0x` prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, CoreError> {
        Ok(Self(hex::decode_fixed::<16>(hex_str, "trade id")?))
    }

    /// Render the identifier as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Debug for TradeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TradeId({})", self.to_hex())
    }
}

impl std::fmt::Display for TradeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for TradeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TradeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Address impls
// ---------------------------------------------------------------------------

impl Address {
    /// Create an address from raw 20 bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Return the raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// The all-zero address. Not a valid signer identity; useful as a
    /// sentinel in tests.
    pub fn zero() -> Self {
        Self([0u8; 20])
    }

    /// Parse an address from a 40-character hex string (optional `0x`
    /// prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, CoreError> {
        Ok(Self(hex::decode_fixed::<20>(hex_str, "address")?))
    }

    /// Render the address as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address(0x{})", self.to_hex())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}
