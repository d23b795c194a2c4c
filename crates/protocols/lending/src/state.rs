//! Lending State Types
//!
//! Data structures for the pool aggregate and account positions.

use lendpool_core::{AccountId, Amount, LedgerError, Rate, Timestamp};
use serde::{Deserialize, Serialize};

use crate::calculator;

/// One account's deposit and borrow records.
///
/// A zero balance with a zero timestamp is the same as no position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPosition {
    /// Deposit balance including settled interest
    pub deposit_principal_and_interest: Amount,
    pub deposit_last_update: Timestamp,
    /// Owed amount including settled interest
    pub borrow_principal_and_interest: Amount,
    pub borrow_last_update: Timestamp,
}

impl AccountPosition {
    pub fn is_empty(&self) -> bool {
        self.deposit_principal_and_interest == 0
            && self.deposit_last_update == 0
            && self.borrow_principal_and_interest == 0
            && self.borrow_last_update == 0
    }

    /// Settle the deposit side to `now`, returning the interest folded in
    pub fn settle_deposit(&mut self, now: Timestamp, rate: Rate) -> Result<Amount, LedgerError> {
        let before = self.deposit_principal_and_interest;
        let (balance, last_update) =
            calculator::settle(before, self.deposit_last_update, now, rate)?;
        self.deposit_principal_and_interest = balance;
        self.deposit_last_update = last_update;
        Ok(balance - before)
    }

    /// Settle the borrow side to `now`, returning the interest folded in
    pub fn settle_borrow(&mut self, now: Timestamp, rate: Rate) -> Result<Amount, LedgerError> {
        let before = self.borrow_principal_and_interest;
        let (balance, last_update) =
            calculator::settle(before, self.borrow_last_update, now, rate)?;
        self.borrow_principal_and_interest = balance;
        self.borrow_last_update = last_update;
        Ok(balance - before)
    }

    /// Copy of this position with both sides settled to `now`
    pub fn projected(&self, now: Timestamp, rate: Rate) -> Result<Self, LedgerError> {
        let mut projected = *self;
        projected.settle_deposit(now, rate)?;
        projected.settle_borrow(now, rate)?;
        Ok(projected)
    }
}

/// Singleton pool aggregate. Token custody is read from the token, not stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTotals {
    /// Sum of settled deposit balances
    pub total_deposited: Amount,
    /// Sum of settled borrow balances
    pub total_borrowed: Amount,
}

impl PoolTotals {
    pub fn available_liquidity(&self) -> Amount {
        calculator::available_liquidity(self.total_deposited, self.total_borrowed)
    }

    pub fn utilization_pct(&self) -> f64 {
        calculator::calculate_utilization(self.total_borrowed, self.total_deposited)
    }
}

/// Pool summary for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub token_symbol: String,
    pub pool_account: AccountId,
    pub annual_rate_bps: u128,
    pub total_deposited: Amount,
    pub total_borrowed: Amount,
    pub available_liquidity: Amount,
    pub custody_balance: Amount,
    pub utilization_pct: f64,
    pub account_count: usize,
    /// Events ever recorded, including ones evicted from the journal
    pub event_count: u64,
}
