//! # Fee and Dispute-Split Arithmetic
//!
//! Checked basis-point arithmetic over `u128` amounts. Every function
//! returns `None` on an unrepresentable intermediate; the engine maps
//! that to `EscrowError::AmountOverflow` before any transfer is
//! attempted.
//!
//! The zero-percent dispute split is a deliberate asymmetry inherited
//! from the protocol: a ruling entirely for the seller refunds the full
//! value with no fee, while every other ruling deducts the fee first.

use serde::{Deserialize, Serialize};

/// Basis-point denominator: 10000 bps = 100%.
pub const BPS_DIVISOR: u128 = 10_000;

/// Compute `floor(value · fee_bps / 10000)`.
pub fn total_fee(value: u128, fee_bps: u16) -> Option<u128> {
    value
        .checked_mul(fee_bps as u128)
        .map(|scaled| scaled / BPS_DIVISOR)
}

/// The three-way settlement of a dispute ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeSplit {
    /// Amount paid to the buyer.
    pub buyer_share: u128,
    /// Amount paid to the seller.
    pub seller_share: u128,
    /// Amount paid to the fee recipient.
    pub fee: u128,
}

impl DisputeSplit {
    /// Total paid out across all three legs.
    pub fn total(&self) -> u128 {
        self.buyer_share + self.seller_share + self.fee
    }
}

/// Settle a ruling of `buyer_percent` (0..=100, validated by the caller).
///
/// `buyer_percent == 0` refunds the seller the full value with no fee.
/// Otherwise the fee comes off the top and the remainder splits
/// `buyer_percent` to the buyer, rest to the seller.
pub fn dispute_split(value: u128, fee_bps: u16, buyer_percent: u8) -> Option<DisputeSplit> {
    if buyer_percent == 0 {
        return Some(DisputeSplit {
            buyer_share: 0,
            seller_share: value,
            fee: 0,
        });
    }
    let fee = total_fee(value, fee_bps)?;
    let net = value.checked_sub(fee)?;
    let buyer_share = net.checked_mul(buyer_percent as u128)? / 100;
    let seller_share = net - buyer_share;
    Some(DisputeSplit {
        buyer_share,
        seller_share,
        fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_total_fee_reference_values() {
        // 0.01 units at 18 decimals, 100 bps
        assert_eq!(
            total_fee(10_000_000_000_000_000, 100),
            Some(100_000_000_000_000)
        );
        assert_eq!(total_fee(10_000, 1), Some(1));
        assert_eq!(total_fee(9_999, 1), Some(0));
        assert_eq!(total_fee(0, 10_000), Some(0));
    }

    #[test]
    fn test_total_fee_overflow() {
        assert_eq!(total_fee(u128::MAX, 2), None);
        assert_eq!(total_fee(u128::MAX, 0), Some(0));
    }

    #[test]
    fn test_split_all_to_buyer() {
        let split = dispute_split(10_000_000_000_000_000, 100, 100).unwrap();
        assert_eq!(split.fee, 100_000_000_000_000);
        assert_eq!(split.buyer_share, 9_900_000_000_000_000);
        assert_eq!(split.seller_share, 0);
    }

    #[test]
    fn test_split_all_to_seller_waives_fee() {
        let split = dispute_split(10_000_000_000_000_000, 100, 0).unwrap();
        assert_eq!(split.fee, 0);
        assert_eq!(split.buyer_share, 0);
        assert_eq!(split.seller_share, 10_000_000_000_000_000);
    }

    #[test]
    fn test_split_even() {
        let split = dispute_split(10_000, 100, 50).unwrap();
        assert_eq!(split.fee, 100);
        assert_eq!(split.buyer_share, 4_950);
        assert_eq!(split.seller_share, 4_950);
    }

    #[test]
    fn test_split_rounding_favors_seller() {
        // net = 9999 after a 1-unit fee at 1 bps; 33% of 9999 floors
        let split = dispute_split(10_000, 1, 33).unwrap();
        assert_eq!(split.fee, 1);
        assert_eq!(split.buyer_share, 3_299);
        assert_eq!(split.seller_share, 6_700);
    }

    proptest! {
        #[test]
        fn prop_fee_never_exceeds_value(value in 0u128..=u128::MAX / 20_000, fee_bps in 0u16..=10_000) {
            let fee = total_fee(value, fee_bps).unwrap();
            prop_assert!(fee <= value);
        }

        #[test]
        fn prop_split_conserves_value(
            value in 0u128..=u128::MAX / 20_000,
            fee_bps in 0u16..=10_000,
            buyer_percent in 0u8..=100,
        ) {
            let split = dispute_split(value, fee_bps, buyer_percent).unwrap();
            prop_assert_eq!(split.total(), value);
        }

        #[test]
        fn prop_zero_percent_is_full_refund(value in 0u128..=u128::MAX / 20_000, fee_bps in 0u16..=10_000) {
            let split = dispute_split(value, fee_bps, 0).unwrap();
            prop_assert_eq!(split.seller_share, value);
            prop_assert_eq!(split.buyer_share, 0);
            prop_assert_eq!(split.fee, 0);
        }
    }
}
