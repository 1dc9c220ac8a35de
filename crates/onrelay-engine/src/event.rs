//! # Observable Escrow Events
//!
//! Structured records of every successful state change, for external
//! auditing. The engine appends them to an in-memory log that is
//! append-only and never retracted; a rejected operation emits nothing.

use serde::{Deserialize, Serialize};

use onrelay_core::{Address, Timestamp, TradeId};

/// An observable escrow event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscrowEvent {
    /// A trade was created and its value pulled into custody.
    Created {
        /// The new trade.
        trade_id: TradeId,
        /// Depositing party.
        seller: Address,
        /// Counterparty.
        buyer: Address,
        /// Settlement token.
        token: Address,
        /// Amount in custody.
        value: u128,
        /// Fee rate fixed for this trade.
        fee_bps: u16,
        /// When the record was committed.
        at: Timestamp,
    },
    /// A seller authorization released the value to the buyer.
    Released {
        /// The settled trade.
        trade_id: TradeId,
        /// Amount paid to the buyer.
        buyer_amount: u128,
        /// Amount paid to the fee recipient.
        fee_amount: u128,
        /// When the settlement committed.
        at: Timestamp,
    },
    /// A buyer authorization cancelled the trade.
    Cancelled {
        /// The settled trade.
        trade_id: TradeId,
        /// Full value refunded to the seller.
        refund: u128,
        /// When the settlement committed.
        at: Timestamp,
    },
    /// An arbitrator ruling settled the trade.
    DisputeResolved {
        /// The settled trade.
        trade_id: TradeId,
        /// The ruling applied.
        buyer_percent: u8,
        /// Amount paid to the buyer.
        buyer_share: u128,
        /// Amount paid to the seller.
        seller_share: u128,
        /// Amount paid to the fee recipient.
        fee_amount: u128,
        /// When the settlement committed.
        at: Timestamp,
    },
}

impl EscrowEvent {
    /// The trade this event concerns.
    pub fn trade_id(&self) -> &TradeId {
        match self {
            Self::Created { trade_id, .. }
            | Self::Released { trade_id, .. }
            | Self::Cancelled { trade_id, .. }
            | Self::DisputeResolved { trade_id, .. } => trade_id,
        }
    }
}
