//! # Trade Records and the Trade State Machine
//!
//! A trade is created `Open` and moves exactly once to one of three
//! terminal states. There is no path back to `Open` and no path between
//! terminal states.
//!
//! ## States
//!
//! ```text
//! Open ──▶ Released   (seller authorized release to buyer)
//!   │
//!   ├────▶ Cancelled  (buyer cancelled; full refund to seller)
//!   │
//!   └────▶ Resolved   (dispute ruling applied)
//! ```

use serde::{Deserialize, Serialize};

use onrelay_core::{Address, MessageDigest, Timestamp, TradeId};

/// The state of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeState {
    /// Value is in custody awaiting an authorized terminal action.
    Open,
    /// Value released to the buyer, fee to the fee recipient (terminal).
    Released,
    /// Full value refunded to the seller (terminal).
    Cancelled,
    /// Dispute ruling applied, value split between the parties (terminal).
    Resolved,
}

impl TradeState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl std::fmt::Display for TradeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Open => "OPEN",
            Self::Released => "RELEASED",
            Self::Cancelled => "CANCELLED",
            Self::Resolved => "RESOLVED",
        };
        f.write_str(s)
    }
}

/// The three terminal outcomes a trade can settle into.
///
/// A separate type rather than a subset check: `TradeLedger::finalize()`
/// takes a `TerminalState`, so finalizing a trade into `Open` cannot be
/// expressed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalState {
    /// Released to the buyer.
    Released,
    /// Cancelled back to the seller.
    Cancelled,
    /// Settled by dispute ruling.
    Resolved,
}

impl From<TerminalState> for TradeState {
    fn from(terminal: TerminalState) -> Self {
        match terminal {
            TerminalState::Released => Self::Released,
            TerminalState::Cancelled => Self::Cancelled,
            TerminalState::Resolved => Self::Resolved,
        }
    }
}

/// A trade record.
///
/// Every field except `state` is fixed at creation. The fee is always
/// recomputed from the immutable `value` and `fee_bps` — never read from
/// mutable state — and `digest` pins the exact tuple the relayer
/// co-signed, so terminal operations can cross-check re-supplied
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Caller-supplied 16-byte identifier, globally unique.
    pub trade_id: TradeId,
    /// The party that deposited the value.
    pub seller: Address,
    /// The party the value is released to on a seller authorization.
    pub buyer: Address,
    /// The token the trade settles in.
    pub token: Address,
    /// Amount in custody; strictly positive.
    pub value: u128,
    /// Fee in basis points of `value`, fixed at creation.
    pub fee_bps: u16,
    /// The trade digest over `(trade_id, seller, buyer, value, fee_bps)`.
    pub digest: MessageDigest,
    /// Current state; `Open` until a terminal operation succeeds.
    pub state: TradeState,
    /// When the record was created.
    pub created_at: Timestamp,
}

impl Trade {
    /// Create a new open trade record.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        trade_id: TradeId,
        seller: Address,
        buyer: Address,
        token: Address,
        value: u128,
        fee_bps: u16,
        digest: MessageDigest,
    ) -> Self {
        Self {
            trade_id,
            seller,
            buyer,
            token,
            value,
            fee_bps,
            digest,
            state: TradeState::Open,
            created_at: Timestamp::now(),
        }
    }

    /// Whether the trade is still awaiting a terminal action.
    pub fn is_open(&self) -> bool {
        self.state == TradeState::Open
    }
}
