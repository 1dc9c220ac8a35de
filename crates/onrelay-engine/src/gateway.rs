//! # Value Transfer Gateway
//!
//! The seam between the escrow engine and the external fungible-token
//! ledger that actually holds balances. The engine moves value through
//! this trait only; it never bookkeeps balances itself.
//!
//! ## Atomicity Contract
//!
//! The engine treats a gateway call plus the subsequent ledger transition
//! as one unit: it performs the transfer first and commits state only on
//! success. For settlements with more than one leg it calls
//! [`ValueGateway::pay_out_split()`], which implementations MUST apply
//! all-or-nothing — either every payout lands or none do. The bundled
//! [`TokenLedger`] validates the full custody debit before crediting
//! anything.

use std::collections::HashMap;

use thiserror::Error;

use onrelay_core::Address;

/// Errors from the external token ledger.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The paying account does not hold enough of the token.
    #[error("insufficient balance: {account} holds {available} of token {token}, needs {needed}")]
    InsufficientBalance {
        /// The token being moved.
        token: Address,
        /// The account being debited.
        account: Address,
        /// Amount the transfer requires.
        needed: u128,
        /// Amount actually held.
        available: u128,
    },

    /// The owner has not pre-authorized custody to pull this amount.
    #[error(
        "insufficient allowance: {owner} approved {available} of token {token} for custody, needs {needed}"
    )]
    InsufficientAllowance {
        /// The token being moved.
        token: Address,
        /// The account that granted the allowance.
        owner: Address,
        /// Amount the pull requires.
        needed: u128,
        /// Amount actually approved.
        available: u128,
    },

    /// Ledger-level rejection.
    #[error("transfer rejected: {reason}")]
    Rejected {
        /// The ledger's stated reason.
        reason: String,
    },
}

/// The external collaborator that moves fungible value.
///
/// The engine calls it; it never calls back into the engine.
pub trait ValueGateway {
    /// Pull `amount` of `token` from `from` into custody. Requires a
    /// pre-authorization from `from`.
    fn pull_into(&mut self, from: Address, token: Address, amount: u128)
        -> Result<(), TransferError>;

    /// Pay `amount` of `token` out of custody to `to`.
    fn pay_out(&mut self, to: Address, token: Address, amount: u128) -> Result<(), TransferError> {
        self.pay_out_split(token, &[(to, amount)])
    }

    /// Pay several legs out of custody as one unit.
    ///
    /// Implementations MUST apply either every payout or none — the
    /// engine relies on this to keep a settlement and its state
    /// transition atomic.
    fn pay_out_split(
        &mut self,
        token: Address,
        payouts: &[(Address, u128)],
    ) -> Result<(), TransferError>;
}

/// In-memory token ledger modeling the external value medium at its
/// interface: per-token balances, owner-to-custody allowances, and a
/// designated custody account.
///
/// `mint` and `approve` exist to stage test and demo scenarios; the
/// engine itself never calls them.
#[derive(Debug)]
pub struct TokenLedger {
    custody: Address,
    /// (token, holder) → balance.
    balances: HashMap<(Address, Address), u128>,
    /// (token, owner) → amount approved for custody to pull.
    allowances: HashMap<(Address, Address), u128>,
}

impl TokenLedger {
    /// Create a ledger whose custody account is `custody`.
    pub fn new(custody: Address) -> Self {
        Self {
            custody,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// The custody account address.
    pub fn custody(&self) -> Address {
        self.custody
    }

    /// Credit `amount` of `token` to `to`.
    pub fn mint(&mut self, token: Address, to: Address, amount: u128) {
        let balance = self.balances.entry((token, to)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Authorize custody to pull up to `amount` of `token` from `owner`.
    /// Replaces any prior approval.
    pub fn approve(&mut self, token: Address, owner: Address, amount: u128) {
        self.allowances.insert((token, owner), amount);
    }

    /// Current balance of `holder` in `token`.
    pub fn balance_of(&self, token: Address, holder: Address) -> u128 {
        self.balances.get(&(token, holder)).copied().unwrap_or(0)
    }

    /// Remaining amount custody may pull from `owner` in `token`.
    pub fn allowance(&self, token: Address, owner: Address) -> u128 {
        self.allowances.get(&(token, owner)).copied().unwrap_or(0)
    }

    fn debit(&mut self, token: Address, account: Address, amount: u128) {
        if let Some(balance) = self.balances.get_mut(&(token, account)) {
            *balance -= amount;
        }
    }
}

impl ValueGateway for TokenLedger {
    fn pull_into(
        &mut self,
        from: Address,
        token: Address,
        amount: u128,
    ) -> Result<(), TransferError> {
        let approved = self.allowance(token, from);
        if approved < amount {
            return Err(TransferError::InsufficientAllowance {
                token,
                owner: from,
                needed: amount,
                available: approved,
            });
        }
        let held = self.balance_of(token, from);
        if held < amount {
            return Err(TransferError::InsufficientBalance {
                token,
                account: from,
                needed: amount,
                available: held,
            });
        }
        self.allowances.insert((token, from), approved - amount);
        self.debit(token, from, amount);
        self.mint(token, self.custody, amount);
        Ok(())
    }

    fn pay_out_split(
        &mut self,
        token: Address,
        payouts: &[(Address, u128)],
    ) -> Result<(), TransferError> {
        let mut needed: u128 = 0;
        for (_, amount) in payouts {
            needed = needed
                .checked_add(*amount)
                .ok_or_else(|| TransferError::Rejected {
                    reason: "payout total overflows".to_string(),
                })?;
        }
        let held = self.balance_of(token, self.custody);
        if held < needed {
            return Err(TransferError::InsufficientBalance {
                token,
                account: self.custody,
                needed,
                available: held,
            });
        }
        // Full debit validated above; the legs cannot partially fail.
        self.debit(token, self.custody, needed);
        for (to, amount) in payouts {
            self.mint(token, *to, *amount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    const TOKEN: u8 = 0xa0;

    fn ledger() -> TokenLedger {
        TokenLedger::new(addr(0xcc))
    }

    #[test]
    fn test_mint_and_balance() {
        let mut gateway = ledger();
        gateway.mint(addr(TOKEN), addr(1), 500);
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(1)), 500);
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(2)), 0);
    }

    #[test]
    fn test_pull_requires_allowance() {
        let mut gateway = ledger();
        gateway.mint(addr(TOKEN), addr(1), 500);
        let result = gateway.pull_into(addr(1), addr(TOKEN), 500);
        assert!(matches!(
            result,
            Err(TransferError::InsufficientAllowance { .. })
        ));
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(1)), 500);
    }

    #[test]
    fn test_pull_requires_balance() {
        let mut gateway = ledger();
        gateway.approve(addr(TOKEN), addr(1), 500);
        let result = gateway.pull_into(addr(1), addr(TOKEN), 500);
        assert!(matches!(
            result,
            Err(TransferError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_pull_moves_value_and_consumes_allowance() {
        let mut gateway = ledger();
        gateway.mint(addr(TOKEN), addr(1), 500);
        gateway.approve(addr(TOKEN), addr(1), 500);
        gateway.pull_into(addr(1), addr(TOKEN), 300).unwrap();
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(1)), 200);
        assert_eq!(gateway.balance_of(addr(TOKEN), gateway.custody()), 300);
        assert_eq!(gateway.allowance(addr(TOKEN), addr(1)), 200);
    }

    #[test]
    fn test_pay_out_split_all_or_nothing() {
        let mut gateway = ledger();
        gateway.mint(addr(TOKEN), gateway.custody(), 100);
        let result = gateway.pay_out_split(addr(TOKEN), &[(addr(1), 80), (addr(2), 30)]);
        assert!(matches!(
            result,
            Err(TransferError::InsufficientBalance { .. })
        ));
        // No leg landed
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(1)), 0);
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(2)), 0);
        assert_eq!(gateway.balance_of(addr(TOKEN), gateway.custody()), 100);
    }

    #[test]
    fn test_pay_out_split_settles_every_leg() {
        let mut gateway = ledger();
        gateway.mint(addr(TOKEN), gateway.custody(), 100);
        gateway
            .pay_out_split(addr(TOKEN), &[(addr(1), 70), (addr(2), 30)])
            .unwrap();
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(1)), 70);
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(2)), 30);
        assert_eq!(gateway.balance_of(addr(TOKEN), gateway.custody()), 0);
    }

    #[test]
    fn test_single_pay_out_delegates_to_split() {
        let mut gateway = ledger();
        gateway.mint(addr(TOKEN), gateway.custody(), 50);
        gateway.pay_out(addr(1), addr(TOKEN), 50).unwrap();
        assert_eq!(gateway.balance_of(addr(TOKEN), addr(1)), 50);
    }
}
