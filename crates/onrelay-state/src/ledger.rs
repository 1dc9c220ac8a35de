//! # Trade Ledger
//!
//! The mapping from trade identifier to trade record. The ledger is the
//! system's sole replay defense: a broadcast signature is public, so
//! uniqueness-of-effect comes from these transitions, not from secrecy.
//!
//! ## Design
//!
//! All mutation funnels through two methods. `open()` admits a record for
//! an identifier exactly once across the ledger's lifetime; `finalize()`
//! moves an open record to a terminal state. Lookups never mutate, and
//! records are never deleted.

use std::collections::HashMap;

use thiserror::Error;

use onrelay_core::TradeId;

use crate::trade::{TerminalState, Trade, TradeState};

/// Errors from ledger transitions.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Creation attempted on an identifier that already has a record.
    #[error("trade {trade_id} already exists")]
    TradeAlreadyExists {
        /// The duplicate identifier.
        trade_id: TradeId,
    },

    /// Action attempted on an identifier with no record.
    #[error("trade {trade_id} not found")]
    TradeNotFound {
        /// The unknown identifier.
        trade_id: TradeId,
    },

    /// Action attempted on a trade already settled.
    #[error("trade {trade_id} is {state}, not OPEN")]
    TradeNotOpen {
        /// The settled trade.
        trade_id: TradeId,
        /// Its terminal state.
        state: TradeState,
    },
}

/// The stateful mapping from trade identifier to trade record.
#[derive(Debug, Default)]
pub struct TradeLedger {
    trades: HashMap<TradeId, Trade>,
}

impl TradeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a new open trade record.
    ///
    /// An identifier transitions from absent to `Open` exactly once;
    /// re-creation is rejected even after the original trade settled.
    pub fn open(&mut self, trade: Trade) -> Result<(), LedgerError> {
        if self.trades.contains_key(&trade.trade_id) {
            return Err(LedgerError::TradeAlreadyExists {
                trade_id: trade.trade_id,
            });
        }
        self.trades.insert(trade.trade_id, trade);
        Ok(())
    }

    /// Move an open trade to a terminal state.
    ///
    /// The target is a [`TerminalState`], so re-opening a trade cannot be
    /// expressed. Returns the settled record.
    pub fn finalize(
        &mut self,
        trade_id: &TradeId,
        to: TerminalState,
    ) -> Result<&Trade, LedgerError> {
        let trade = self
            .trades
            .get_mut(trade_id)
            .ok_or(LedgerError::TradeNotFound { trade_id: *trade_id })?;
        if !trade.is_open() {
            return Err(LedgerError::TradeNotOpen {
                trade_id: *trade_id,
                state: trade.state,
            });
        }
        trade.state = to.into();
        Ok(trade)
    }

    /// Look up a trade record. Read-only; never mutates.
    pub fn get(&self, trade_id: &TradeId) -> Option<&Trade> {
        self.trades.get(trade_id)
    }

    /// Whether a record exists for the identifier (open or settled).
    pub fn contains(&self, trade_id: &TradeId) -> bool {
        self.trades.contains_key(trade_id)
    }

    /// Number of records ever created.
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onrelay_core::{Address, MessageDigest};

    fn make_trade(id_byte: u8) -> Trade {
        Trade::open(
            TradeId::from_bytes([id_byte; 16]),
            Address::from_bytes([2u8; 20]),
            Address::from_bytes([3u8; 20]),
            Address::from_bytes([4u8; 20]),
            1_000,
            100,
            MessageDigest::from_bytes([5u8; 32]),
        )
    }

    #[test]
    fn test_open_then_get() {
        let mut ledger = TradeLedger::new();
        let trade = make_trade(1);
        let trade_id = trade.trade_id;
        ledger.open(trade).unwrap();
        assert!(ledger.contains(&trade_id));
        assert!(ledger.get(&trade_id).unwrap().is_open());
    }

    #[test]
    fn test_duplicate_open_rejected() {
        let mut ledger = TradeLedger::new();
        ledger.open(make_trade(1)).unwrap();
        let result = ledger.open(make_trade(1));
        match result.unwrap_err() {
            LedgerError::TradeAlreadyExists { trade_id } => {
                assert_eq!(trade_id, TradeId::from_bytes([1u8; 16]));
            }
            other => panic!("expected TradeAlreadyExists, got: {other:?}"),
        }
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_identifier_never_reused_after_settlement() {
        let mut ledger = TradeLedger::new();
        let trade = make_trade(1);
        let trade_id = trade.trade_id;
        ledger.open(trade).unwrap();
        ledger.finalize(&trade_id, TerminalState::Released).unwrap();
        assert!(matches!(
            ledger.open(make_trade(1)),
            Err(LedgerError::TradeAlreadyExists { .. })
        ));
    }

    #[test]
    fn test_finalize_unknown_trade() {
        let mut ledger = TradeLedger::new();
        let missing = TradeId::from_bytes([9u8; 16]);
        assert!(matches!(
            ledger.finalize(&missing, TerminalState::Cancelled),
            Err(LedgerError::TradeNotFound { .. })
        ));
    }

    #[test]
    fn test_finalize_is_monotone() {
        let mut ledger = TradeLedger::new();
        let trade = make_trade(1);
        let trade_id = trade.trade_id;
        ledger.open(trade).unwrap();

        let settled = ledger.finalize(&trade_id, TerminalState::Cancelled).unwrap();
        assert_eq!(settled.state, TradeState::Cancelled);

        for target in [
            TerminalState::Released,
            TerminalState::Cancelled,
            TerminalState::Resolved,
        ] {
            match ledger.finalize(&trade_id, target) {
                Err(LedgerError::TradeNotOpen { state, .. }) => {
                    assert_eq!(state, TradeState::Cancelled);
                }
                other => panic!("expected TradeNotOpen, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_settled_record_is_permanent_history() {
        let mut ledger = TradeLedger::new();
        let trade = make_trade(1);
        let trade_id = trade.trade_id;
        ledger.open(trade).unwrap();
        ledger.finalize(&trade_id, TerminalState::Resolved).unwrap();
        let record = ledger.get(&trade_id).unwrap();
        assert_eq!(record.state, TradeState::Resolved);
        assert_eq!(record.value, 1_000);
    }

    #[test]
    fn test_rejected_finalize_leaves_record_unchanged() {
        let mut ledger = TradeLedger::new();
        let trade = make_trade(1);
        let trade_id = trade.trade_id;
        ledger.open(trade).unwrap();
        ledger.finalize(&trade_id, TerminalState::Released).unwrap();
        let before = serde_json::to_string(ledger.get(&trade_id).unwrap()).unwrap();

        let _ = ledger.finalize(&trade_id, TerminalState::Cancelled);
        let after = serde_json::to_string(ledger.get(&trade_id).unwrap()).unwrap();
        assert_eq!(before, after);
    }
}
