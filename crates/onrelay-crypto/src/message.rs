//! # Signing-Digest Pipelines
//!
//! Composes the wire layouts from `onrelay-core` with the Keccak
//! primitives into the exact digest each authorization schema signs.
//! All functions here are pure: identical inputs always yield an
//! identical digest.
//!
//! ## Pipelines
//!
//! ```text
//! creation:        personal(keccak(keccak(creation_layout)))
//! release/cancel:  personal(keccak(action_layout))
//! dispute:         personal(keccak(dispute_layout))
//! ```
//!
//! The creation pipeline hashes twice before the personal wrap: the inner
//! digest is the *trade digest* that identifies the trade tuple, and the
//! outer re-hash turns it into the instruction a relayer co-signs. The
//! trade digest is stored on the ledger record so terminal operations can
//! cross-check re-supplied parameters.

use onrelay_core::wire::{self, ActionKind};
use onrelay_core::{Address, MessageDigest, TradeId};

use crate::keccak;

/// The trade digest: `keccak256` of the creation layout.
///
/// Identifies the full trade tuple. Stored on the trade record at
/// creation; terminal operations recompute it from their parameters and
/// treat a mismatch as an unknown trade.
pub fn creation_digest(
    trade_id: &TradeId,
    seller: &Address,
    buyer: &Address,
    value: u128,
    fee_bps: u16,
) -> MessageDigest {
    let layout = wire::creation_layout(trade_id, seller, buyer, value, fee_bps);
    keccak::keccak256(&layout)
}

/// The digest a relayer signs to authorize trade creation.
///
/// Re-hashes the trade digest and applies the personal-message wrap, so
/// the raw trade digest can never be replayed as a different kind of
/// signed statement.
pub fn creation_signing_digest(
    trade_id: &TradeId,
    seller: &Address,
    buyer: &Address,
    value: u128,
    fee_bps: u16,
) -> MessageDigest {
    let trade_digest = creation_digest(trade_id, seller, buyer, value, fee_bps);
    keccak::personal_message_digest(&keccak::rehash(&trade_digest))
}

/// The digest a party signs to authorize a terminal action.
///
/// For `Release` and `Cancel` the layout binds the fee bound the signer
/// accepts; for `Resolve` it binds only the trade identifier and action
/// code — the ruling percentage is intentionally outside the signature.
pub fn action_signing_digest(
    trade_id: &TradeId,
    action: ActionKind,
    fee_bound: u128,
) -> MessageDigest {
    let layout = wire::action_layout(trade_id, action, fee_bound);
    keccak::personal_message_digest(&keccak::keccak256(&layout))
}
