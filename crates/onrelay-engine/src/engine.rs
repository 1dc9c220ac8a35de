//! # Escrow Engine Operations
//!
//! The orchestrator: validates inputs, builds the expected signing digest,
//! verifies the signer against the role the action requires, computes
//! fees, and applies the gateway transfer plus the ledger transition as
//! one unit.
//!
//! ## Check Order
//!
//! Every operation verifies the signature before touching the ledger, so
//! an unauthorized caller learns nothing about which trades exist. The
//! gateway transfer always precedes the ledger commit; a transfer failure
//! aborts the operation with no observable state change.
//!
//! ## Parameter Cross-Check
//!
//! Terminal operations re-supply the trade tuple. The engine recomputes
//! the creation digest from those parameters and compares it against the
//! digest pinned at creation; a mismatch addresses no known trade and is
//! reported as `TradeNotFound`.

use onrelay_core::wire::ActionKind;
use onrelay_core::{Address, Timestamp, TradeId};
use onrelay_crypto::message;
use onrelay_crypto::secp256k1::{verify_signer, RecoverableSignature};
use onrelay_state::{LedgerError, TerminalState, Trade, TradeLedger};

use crate::config::EngineConfig;
use crate::error::EscrowError;
use crate::event::EscrowEvent;
use crate::fees;
use crate::gateway::ValueGateway;

/// The escrow engine: role configuration, the trade ledger, the gateway
/// to the external token ledger, and the observable event log.
#[derive(Debug)]
pub struct EscrowEngine<G: ValueGateway> {
    config: EngineConfig,
    ledger: TradeLedger,
    gateway: G,
    events: Vec<EscrowEvent>,
}

impl<G: ValueGateway> EscrowEngine<G> {
    /// Construct an engine over a gateway.
    ///
    /// Rejects a fee rate above 10000 bps — a trade could otherwise be
    /// created whose fee exceeds its value.
    pub fn new(config: EngineConfig, gateway: G) -> Result<Self, EscrowError> {
        if config.fee_bps > fees::BPS_DIVISOR as u16 {
            return Err(EscrowError::InvalidFeeRate {
                fee_bps: config.fee_bps,
            });
        }
        Ok(Self {
            config,
            ledger: TradeLedger::new(),
            gateway,
            events: Vec::new(),
        })
    }

    /// Create a trade and pull its value into custody.
    ///
    /// `caller` is the depositing seller. The buyer and fee rate are the
    /// engine's configured constants; together with the caller-supplied
    /// identifier, token, and value they form the tuple the relayer must
    /// have co-signed.
    pub fn create_escrow(
        &mut self,
        caller: Address,
        trade_id: TradeId,
        token: Address,
        value: u128,
        signature: &RecoverableSignature,
    ) -> Result<(), EscrowError> {
        let signing = message::creation_signing_digest(
            &trade_id,
            &caller,
            &self.config.buyer,
            value,
            self.config.fee_bps,
        );
        if !verify_signer(&signing, signature, &self.config.relayer) {
            return Err(EscrowError::UnauthorizedSigner {
                expected: self.config.relayer,
            });
        }
        if self.ledger.contains(&trade_id) {
            return Err(LedgerError::TradeAlreadyExists { trade_id }.into());
        }
        if value == 0 {
            return Err(EscrowError::ValueTooSmall);
        }

        self.gateway.pull_into(caller, token, value)?;

        let digest = message::creation_digest(
            &trade_id,
            &caller,
            &self.config.buyer,
            value,
            self.config.fee_bps,
        );
        self.ledger.open(Trade::open(
            trade_id,
            caller,
            self.config.buyer,
            token,
            value,
            self.config.fee_bps,
            digest,
        ))?;

        tracing::info!(trade_id = %trade_id, seller = %caller, %value, "escrow created");
        self.events.push(EscrowEvent::Created {
            trade_id,
            seller: caller,
            buyer: self.config.buyer,
            token,
            value,
            fee_bps: self.config.fee_bps,
            at: Timestamp::now(),
        });
        Ok(())
    }

    /// Settle a trade through one of the two direct release paths.
    ///
    /// `Release` requires the seller's signature and pays the buyer the
    /// value minus the fee; `Cancel` requires the buyer's signature and
    /// refunds the seller in full. The signed message binds the fee bound
    /// the authorizer accepts.
    #[allow(clippy::too_many_arguments)]
    pub fn relay(
        &mut self,
        trade_id: TradeId,
        seller: Address,
        buyer: Address,
        value: u128,
        fee_bps: u16,
        fee_bound: u128,
        signature: &RecoverableSignature,
        action: ActionKind,
    ) -> Result<(), EscrowError> {
        let required = match action {
            ActionKind::Release => seller,
            ActionKind::Cancel => buyer,
            ActionKind::Resolve => return Err(EscrowError::InvalidAction { action }),
        };
        let signing = message::action_signing_digest(&trade_id, action, fee_bound);
        if !verify_signer(&signing, signature, &required) {
            return Err(EscrowError::UnauthorizedSigner { expected: required });
        }

        let token = self
            .require_open(&trade_id, &seller, &buyer, value, fee_bps)?
            .token;

        match action {
            ActionKind::Release => {
                let fee = fees::total_fee(value, fee_bps).ok_or(EscrowError::AmountOverflow)?;
                if fee > fee_bound {
                    return Err(EscrowError::FeeBoundExceeded {
                        fee,
                        bound: fee_bound,
                    });
                }
                let buyer_amount = value.checked_sub(fee).ok_or(EscrowError::AmountOverflow)?;
                let payouts = non_zero_payouts(&[
                    (buyer, buyer_amount),
                    (self.config.fee_recipient, fee),
                ]);
                self.gateway.pay_out_split(token, &payouts)?;
                self.ledger.finalize(&trade_id, TerminalState::Released)?;

                tracing::info!(trade_id = %trade_id, %buyer_amount, %fee, "escrow released to buyer");
                self.events.push(EscrowEvent::Released {
                    trade_id,
                    buyer_amount,
                    fee_amount: fee,
                    at: Timestamp::now(),
                });
            }
            ActionKind::Cancel => {
                self.gateway.pay_out(seller, token, value)?;
                self.ledger.finalize(&trade_id, TerminalState::Cancelled)?;

                tracing::info!(trade_id = %trade_id, refund = %value, "escrow cancelled by buyer");
                self.events.push(EscrowEvent::Cancelled {
                    trade_id,
                    refund: value,
                    at: Timestamp::now(),
                });
            }
            // Rejected above.
            ActionKind::Resolve => {}
        }
        Ok(())
    }

    /// Apply a dispute ruling.
    ///
    /// The arbitrator's signature covers only the trade identifier and
    /// action code — NOT the ruling percentage. The signer authorizes
    /// "apply whatever ruling is submitted"; this engine is the sole
    /// enforcer of the ruling's range. A known trust-boundary property of
    /// the protocol, preserved rather than strengthened.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve_dispute(
        &mut self,
        trade_id: TradeId,
        seller: Address,
        buyer: Address,
        value: u128,
        fee_bps: u16,
        signature: &RecoverableSignature,
        buyer_percent: u8,
    ) -> Result<(), EscrowError> {
        let signing = message::action_signing_digest(&trade_id, ActionKind::Resolve, 0);
        if !verify_signer(&signing, signature, &self.config.arbitrator) {
            return Err(EscrowError::UnauthorizedSigner {
                expected: self.config.arbitrator,
            });
        }
        if buyer_percent > 100 {
            return Err(EscrowError::InvalidPercentage { got: buyer_percent });
        }

        let token = self
            .require_open(&trade_id, &seller, &buyer, value, fee_bps)?
            .token;

        let split =
            fees::dispute_split(value, fee_bps, buyer_percent).ok_or(EscrowError::AmountOverflow)?;
        let payouts = non_zero_payouts(&[
            (buyer, split.buyer_share),
            (seller, split.seller_share),
            (self.config.fee_recipient, split.fee),
        ]);
        self.gateway.pay_out_split(token, &payouts)?;
        self.ledger.finalize(&trade_id, TerminalState::Resolved)?;

        tracing::info!(
            trade_id = %trade_id,
            %buyer_percent,
            buyer_share = %split.buyer_share,
            seller_share = %split.seller_share,
            fee = %split.fee,
            "dispute resolved"
        );
        self.events.push(EscrowEvent::DisputeResolved {
            trade_id,
            buyer_percent,
            buyer_share: split.buyer_share,
            seller_share: split.seller_share,
            fee_amount: split.fee,
            at: Timestamp::now(),
        });
        Ok(())
    }

    /// Look up a trade record. Read-only, always safe, never mutates.
    pub fn trade(&self, trade_id: &TradeId) -> Option<&Trade> {
        self.ledger.get(trade_id)
    }

    /// The append-only event log.
    pub fn events(&self) -> &[EscrowEvent] {
        &self.events
    }

    /// The engine's role configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying gateway (balance inspection).
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Mutable gateway access. The gateway models an externally mutable
    /// token ledger — other parties mint, approve, and transact on it
    /// outside the engine.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// Fetch the trade for a terminal operation, cross-checking the
    /// re-supplied parameters against the creation digest.
    fn require_open(
        &self,
        trade_id: &TradeId,
        seller: &Address,
        buyer: &Address,
        value: u128,
        fee_bps: u16,
    ) -> Result<&Trade, EscrowError> {
        let trade = self
            .ledger
            .get(trade_id)
            .ok_or(LedgerError::TradeNotFound { trade_id: *trade_id })?;
        let digest = message::creation_digest(trade_id, seller, buyer, value, fee_bps);
        if digest != trade.digest {
            return Err(LedgerError::TradeNotFound { trade_id: *trade_id }.into());
        }
        if !trade.is_open() {
            return Err(LedgerError::TradeNotOpen {
                trade_id: *trade_id,
                state: trade.state,
            }
            .into());
        }
        Ok(trade)
    }
}

/// Drop zero-amount legs from a settlement.
fn non_zero_payouts(legs: &[(Address, u128)]) -> Vec<(Address, u128)> {
    legs.iter().copied().filter(|(_, amount)| *amount > 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::TokenLedger;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    fn config() -> EngineConfig {
        EngineConfig {
            relayer: addr(1),
            fee_recipient: addr(2),
            buyer: addr(3),
            arbitrator: addr(3),
            fee_bps: 100,
        }
    }

    #[test]
    fn test_fee_rate_above_divisor_rejected() {
        let mut bad = config();
        bad.fee_bps = 10_001;
        let result = EscrowEngine::new(bad, TokenLedger::new(addr(0xcc)));
        assert!(matches!(
            result,
            Err(EscrowError::InvalidFeeRate { fee_bps: 10_001 })
        ));
    }

    #[test]
    fn test_full_rate_accepted() {
        let mut full = config();
        full.fee_bps = 10_000;
        assert!(EscrowEngine::new(full, TokenLedger::new(addr(0xcc))).is_ok());
    }

    #[test]
    fn test_relay_rejects_dispute_action() {
        let mut engine = EscrowEngine::new(config(), TokenLedger::new(addr(0xcc))).unwrap();
        let signature = RecoverableSignature::new(27, [1u8; 32], [1u8; 32]);
        let result = engine.relay(
            TradeId::from_bytes([1u8; 16]),
            addr(4),
            addr(3),
            1_000,
            100,
            u128::MAX,
            &signature,
            ActionKind::Resolve,
        );
        assert!(matches!(
            result,
            Err(EscrowError::InvalidAction {
                action: ActionKind::Resolve
            })
        ));
    }

    #[test]
    fn test_non_zero_payouts_filters() {
        let legs = [(addr(1), 10u128), (addr(2), 0), (addr(3), 5)];
        let filtered = non_zero_payouts(&legs);
        assert_eq!(filtered, vec![(addr(1), 10), (addr(3), 5)]);
    }
}
