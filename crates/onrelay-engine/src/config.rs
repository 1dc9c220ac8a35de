//! # Engine Configuration
//!
//! Role identities bound at construction time and immutable thereafter.
//! Reconfiguration is not an engine concern; a deployment that needs new
//! roles is a new engine.

use serde::{Deserialize, Serialize};

use onrelay_core::Address;

/// Construction-time identity and fee configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The identity authorized to co-sign trade creation. Enables
    /// meta-transaction submission: counterparties sign messages, the
    /// relayer submits them.
    pub relayer: Address,
    /// Receiver of the fee cut on releases and fee-charging dispute
    /// splits.
    pub fee_recipient: Address,
    /// The buyer identity bound into creation messages.
    pub buyer: Address,
    /// The identity authorized to submit dispute rulings. Reference
    /// deployments point this at the buyer's own key; the configuration
    /// keeps the role distinct.
    pub arbitrator: Address,
    /// Fee in basis points (1/10000) of the trade value, fixed per trade
    /// at creation. At most 10000.
    pub fee_bps: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_roundtrip() {
        let config = EngineConfig {
            relayer: Address::from_bytes([1u8; 20]),
            fee_recipient: Address::from_bytes([2u8; 20]),
            buyer: Address::from_bytes([3u8; 20]),
            arbitrator: Address::from_bytes([3u8; 20]),
            fee_bps: 100,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.relayer, config.relayer);
        assert_eq!(parsed.fee_bps, config.fee_bps);
    }
}
