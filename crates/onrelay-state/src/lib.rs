//! # onrelay-state — The Trade Ledger
//!
//! Implements the stateful core of the escrow engine:
//!
//! - **Trade** (`trade.rs`): the trade record and its state machine —
//!   `Open` is the only non-terminal state; `Released`, `Cancelled`, and
//!   `Resolved` are terminal, mutually exclusive, and final. Terminal
//!   transitions are encoded in a dedicated `TerminalState` type, so a
//!   transition *into* `Open` is a compile error, not a runtime check.
//!
//! - **Ledger** (`ledger.rs`): the mapping from trade identifier to trade
//!   record. Enforces creation uniqueness (an identifier is never reused,
//!   even post-terminal) and funnels every mutation through two methods:
//!   `open()` and `finalize()`. Records are never deleted — terminal
//!   states are permanent history.
//!
//! ## Crate Policy
//!
//! - Depends only on `onrelay-core` internally.
//! - No signature or transfer concerns here: replay protection is purely
//!   a property of these state transitions, and the ledger assumes its
//!   caller has already authorized the mutation.

pub mod ledger;
pub mod trade;

pub use ledger::{LedgerError, TradeLedger};
pub use trade::{TerminalState, Trade, TradeState};
