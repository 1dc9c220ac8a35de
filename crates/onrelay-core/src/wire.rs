//! # Wire Layouts — Packed Byte Sequences for Signable Messages
//!
//! This module defines `WireBytes`, the sole construction path for the byte
//! sequences that the escrow protocol hashes and signs, plus the fixed
//! layouts of the three message schemas.
//!
//! ## Security Invariant
//!
//! The `WireBytes` newtype has a private inner field. The only way to
//! construct it is through the layout encoders in this module, and the
//! Keccak entry points in `onrelay-crypto` accept only `&WireBytes`. Any
//! function that needs a signable byte sequence therefore gets one that was
//! packed field-by-field in fixed order and fixed width — a digest over an
//! ad-hoc concatenation is structurally impossible.
//!
//! Distinct schemas cannot collide: the creation layout is 90 bytes, the
//! fee-bounded action layouts are 33 bytes with the action code at a fixed
//! offset, and the dispute layout is 17 bytes.
//!
//! ## Layouts
//!
//! All integers are big-endian.
//!
//! ```text
//! creation: trade_id (16) ‖ seller (20) ‖ buyer (20) ‖ value (32) ‖ fee_bps (2)
//! release:  trade_id (16) ‖ 0x01 (1) ‖ fee_bound (16)
//! cancel:   trade_id (16) ‖ 0x02 (1) ‖ fee_bound (16)
//! dispute:  trade_id (16) ‖ 0x03 (1)
//! ```
//!
//! The `value` field is 256 bits wide on the wire; the `u128` amount is
//! zero-extended into the low half.

use serde::{Deserialize, Serialize};

use crate::identity::{Address, TradeId};

/// Byte length of the creation message layout.
pub const CREATION_LAYOUT_LEN: usize = 16 + 20 + 20 + 32 + 2;

/// Byte length of the release/cancel message layout.
pub const ACTION_LAYOUT_LEN: usize = 16 + 1 + 16;

/// Byte length of the dispute message layout.
pub const DISPUTE_LAYOUT_LEN: usize = 16 + 1;

/// The authorized action a signed message grants.
///
/// Each variant maps to exactly one message layout and one required signer
/// role; the engine dispatches on the variant rather than a class
/// hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Release the escrowed value to the buyer, minus the fee.
    /// Required signer: the seller.
    Release,
    /// Cancel the trade and refund the full value to the seller.
    /// Required signer: the buyer.
    Cancel,
    /// Apply a dispute ruling splitting the value between the parties.
    /// Required signer: the configured arbitrator.
    Resolve,
}

impl ActionKind {
    /// The single-byte action code bound into the message layout.
    pub fn code(&self) -> u8 {
        match self {
            Self::Release => 0x01,
            Self::Cancel => 0x02,
            Self::Resolve => 0x03,
        }
    }

    /// Parse an action code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Release),
            0x02 => Some(Self::Cancel),
            0x03 => Some(Self::Resolve),
            _ => None,
        }
    }

    /// Whether this action settles through `relay` (fee-bounded layouts).
    /// `Resolve` has its own operation and layout.
    pub fn is_relay_action(&self) -> bool {
        matches!(self, Self::Release | Self::Cancel)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Release => "RELEASE",
            Self::Cancel => "CANCEL",
            Self::Resolve => "RESOLVE",
        };
        f.write_str(s)
    }
}

/// Bytes produced exclusively by the fixed-layout message encoders.
///
/// # Invariants
///
/// - The only constructors are [`creation_layout()`] and
///   [`action_layout()`].
/// - Fields are packed in fixed order and fixed width, big-endian.
/// - Identical inputs always yield identical bytes; no randomness, no
///   external state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireBytes(Vec<u8>);

impl WireBytes {
    /// Access the packed bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the packed layout in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A layout is never empty; present for clippy completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encode the creation message layout.
///
/// Binds the full trade tuple — identifier, both parties, value, and fee
/// rate — so a relayer-signed creation authorization cannot be replayed
/// with any field substituted.
pub fn creation_layout(
    trade_id: &TradeId,
    seller: &Address,
    buyer: &Address,
    value: u128,
    fee_bps: u16,
) -> WireBytes {
    let mut bytes = Vec::with_capacity(CREATION_LAYOUT_LEN);
    bytes.extend_from_slice(trade_id.as_bytes());
    bytes.extend_from_slice(seller.as_bytes());
    bytes.extend_from_slice(buyer.as_bytes());
    bytes.extend_from_slice(&[0u8; 16]);
    bytes.extend_from_slice(&value.to_be_bytes());
    bytes.extend_from_slice(&fee_bps.to_be_bytes());
    WireBytes(bytes)
}

/// Encode an action message layout.
///
/// Release and cancel bind the trade identifier, the action code, and the
/// fee bound the signer accepts. The dispute layout binds only the trade
/// identifier and the action code — the ruling percentage is supplied
/// unsigned at call time, and `fee_bound` is ignored for that schema.
pub fn action_layout(trade_id: &TradeId, action: ActionKind, fee_bound: u128) -> WireBytes {
    let mut bytes = Vec::with_capacity(ACTION_LAYOUT_LEN);
    bytes.extend_from_slice(trade_id.as_bytes());
    bytes.push(action.code());
    if action.is_relay_action() {
        bytes.extend_from_slice(&fee_bound.to_be_bytes());
    }
    WireBytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn trade_id() -> TradeId {
        TradeId::from_hex("8a221ffd05e94a16b4590b508d085ef7").unwrap()
    }

    fn party(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn test_creation_layout_length() {
        let layout = creation_layout(&trade_id(), &party(1), &party(2), 10u128.pow(16), 100);
        assert_eq!(layout.len(), CREATION_LAYOUT_LEN);
        assert_eq!(layout.len(), 90);
    }

    #[test]
    fn test_creation_layout_field_offsets() {
        let value = 10_000_000_000_000_000u128;
        let layout = creation_layout(&trade_id(), &party(1), &party(2), value, 100);
        let bytes = layout.as_bytes();
        assert_eq!(&bytes[..16], trade_id().as_bytes());
        assert_eq!(&bytes[16..36], party(1).as_bytes());
        assert_eq!(&bytes[36..56], party(2).as_bytes());
        // value: 32 bytes, u128 zero-extended into the low half
        assert_eq!(&bytes[56..72], &[0u8; 16]);
        assert_eq!(&bytes[72..88], &value.to_be_bytes());
        assert_eq!(&bytes[88..90], &100u16.to_be_bytes());
    }

    #[test]
    fn test_action_layout_release() {
        let layout = action_layout(&trade_id(), ActionKind::Release, u128::MAX);
        assert_eq!(layout.len(), ACTION_LAYOUT_LEN);
        let bytes = layout.as_bytes();
        assert_eq!(&bytes[..16], trade_id().as_bytes());
        assert_eq!(bytes[16], 0x01);
        assert_eq!(&bytes[17..33], &[0xff; 16]);
    }

    #[test]
    fn test_action_layout_cancel_code() {
        let layout = action_layout(&trade_id(), ActionKind::Cancel, u128::MAX);
        assert_eq!(layout.as_bytes()[16], 0x02);
    }

    #[test]
    fn test_dispute_layout_omits_fee_bound() {
        let layout = action_layout(&trade_id(), ActionKind::Resolve, u128::MAX);
        assert_eq!(layout.len(), DISPUTE_LAYOUT_LEN);
        assert_eq!(layout.as_bytes()[16], 0x03);
    }

    #[test]
    fn test_schemas_cannot_collide() {
        let creation = creation_layout(&trade_id(), &party(1), &party(2), 1, 1);
        let release = action_layout(&trade_id(), ActionKind::Release, 1);
        let dispute = action_layout(&trade_id(), ActionKind::Resolve, 1);
        assert_ne!(creation.len(), release.len());
        assert_ne!(release.len(), dispute.len());
    }

    #[test]
    fn test_action_codes_roundtrip() {
        for action in [ActionKind::Release, ActionKind::Cancel, ActionKind::Resolve] {
            assert_eq!(ActionKind::from_code(action.code()), Some(action));
        }
        assert_eq!(ActionKind::from_code(0x00), None);
        assert_eq!(ActionKind::from_code(0x04), None);
    }

    #[test]
    fn test_deterministic() {
        let a = creation_layout(&trade_id(), &party(1), &party(2), 42, 7);
        let b = creation_layout(&trade_id(), &party(1), &party(2), 42, 7);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_creation_layout_is_injective_in_value(a in any::<u128>(), b in any::<u128>()) {
            let la = creation_layout(&trade_id(), &party(1), &party(2), a, 100);
            let lb = creation_layout(&trade_id(), &party(1), &party(2), b, 100);
            prop_assert_eq!(la == lb, a == b);
        }

        #[test]
        fn prop_action_layout_binds_fee_bound(bound in any::<u128>()) {
            let layout = action_layout(&trade_id(), ActionKind::Release, bound);
            prop_assert_eq!(&layout.as_bytes()[17..33], &bound.to_be_bytes());
        }
    }
}
