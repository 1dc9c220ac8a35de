//! # Escrow Operation Errors
//!
//! The engine's error taxonomy. Every failure is reported synchronously
//! to the caller, nothing is retried internally, and a rejected operation
//! leaves the trade record and all balances exactly as they were.

use thiserror::Error;

use onrelay_core::wire::ActionKind;
use onrelay_core::Address;
use onrelay_state::LedgerError;

use crate::gateway::TransferError;

/// Errors from the escrow operations.
#[derive(Error, Debug)]
pub enum EscrowError {
    /// The signature does not recover to the signer the attempted action
    /// requires. Malformed signatures collapse into this variant: a
    /// broken triple authorizes nothing.
    #[error("signature does not recover to required signer {expected}")]
    UnauthorizedSigner {
        /// The identity the action requires.
        expected: Address,
    },

    /// Creation uniqueness, existence, or open-state violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Creation with a zero value.
    #[error("escrow value too small")]
    ValueTooSmall,

    /// Dispute resolution with a ruling outside 0..=100.
    #[error("dispute percentage {got} outside 0..=100")]
    InvalidPercentage {
        /// The rejected ruling value.
        got: u8,
    },

    /// The computed fee exceeds the bound the authorizer signed.
    #[error("computed fee {fee} exceeds signed bound {bound}")]
    FeeBoundExceeded {
        /// Fee computed from the trade's value and rate.
        fee: u128,
        /// Maximum the signature covers.
        bound: u128,
    },

    /// `relay` was invoked with an action that settles elsewhere.
    #[error("action {action} is not a relay action")]
    InvalidAction {
        /// The rejected action.
        action: ActionKind,
    },

    /// Fee or split arithmetic left the representable range.
    #[error("amount arithmetic overflow")]
    AmountOverflow,

    /// Engine constructed with a fee rate above 100%.
    #[error("fee rate {fee_bps} bps exceeds 10000")]
    InvalidFeeRate {
        /// The rejected rate.
        fee_bps: u16,
    },

    /// The value-transfer gateway could not move funds. The enclosing
    /// operation aborted with no state mutation.
    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}
