//! Pooled Lending Ledger
//!
//! Owns every account position and the pool aggregate. Each mutating
//! operation settles the caller's relevant balance, checks, moves tokens and
//! commits as one critical section. Bookkeeping is staged on copies and only
//! written back after the token transfer succeeds, so a rejected operation
//! leaves no trace: no settlement, no balance change, no event.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use lendpool_core::constants::DEFAULT_MAX_EVENTS;
use lendpool_core::{AccountId, Amount, LedgerConfig, LedgerError, Rate, Timestamp};
use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::events::{LedgerEvent, Operation};
use crate::state::{AccountPosition, PoolSnapshot, PoolTotals};
use crate::token::TokenTransfer;

#[derive(Debug, Default)]
struct LedgerState {
    positions: HashMap<AccountId, AccountPosition>,
    totals: PoolTotals,
    // Most recent events, oldest evicted first
    events: VecDeque<LedgerEvent>,
    next_sequence: u64,
}

impl LedgerState {
    fn position(&self, account: &AccountId) -> AccountPosition {
        self.positions.get(account).copied().unwrap_or_default()
    }

    #[allow(clippy::too_many_arguments)]
    fn commit(
        &mut self,
        account: &AccountId,
        position: AccountPosition,
        totals: PoolTotals,
        operation: Operation,
        amount: Amount,
        now: Timestamp,
        capacity: usize,
    ) -> LedgerEvent {
        self.positions.insert(account.clone(), position);
        self.totals = totals;

        let event = LedgerEvent {
            sequence: self.next_sequence,
            operation,
            account: account.clone(),
            amount,
            timestamp: now,
        };
        self.next_sequence += 1;
        if self.events.len() == capacity {
            self.events.pop_front();
        }
        self.events.push_back(event.clone());
        event
    }
}

/// Single-asset lending ledger over an external token
pub struct Ledger {
    token: Arc<dyn TokenTransfer>,
    clock: Arc<dyn Clock>,
    pool_account: AccountId,
    rate: Rate,
    event_capacity: usize,
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create a ledger that custodies `token` under `pool_account`
    pub fn new(token: Arc<dyn TokenTransfer>, pool_account: AccountId, rate: Rate) -> Self {
        Self {
            token,
            clock: Arc::new(SystemClock),
            pool_account,
            rate,
            event_capacity: DEFAULT_MAX_EVENTS,
            state: Mutex::new(LedgerState::default()),
        }
    }

    pub fn from_config(token: Arc<dyn TokenTransfer>, config: &LedgerConfig) -> Self {
        Self::new(token, config.pool_account.clone(), config.interest_rate())
            .with_event_capacity(config.max_events)
    }

    /// Keep at most `capacity` journal entries (at least one)
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Pull `amount` from `account` into the pool and credit its deposit
    pub fn deposit(
        &self,
        account: &AccountId,
        amount: Amount,
    ) -> Result<AccountPosition, LedgerError> {
        ensure_positive(Operation::Deposit, amount)?;

        let mut state = self.state.lock();
        let now = self.clock.now();
        let mut position = state.position(account);
        let mut totals = state.totals;

        let interest = position.settle_deposit(now, self.rate)?;
        position.deposit_principal_and_interest = position
            .deposit_principal_and_interest
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        totals.total_deposited = totals
            .total_deposited
            .checked_add(interest)
            .and_then(|total| total.checked_add(amount))
            .ok_or(LedgerError::MathOverflow)?;

        self.token
            .transfer_from(&self.pool_account, account, &self.pool_account, amount)
            .map_err(|e| self.rejected(Operation::Deposit, account, amount, e.into()))?;

        self.finish(&mut state, account, position, totals, Operation::Deposit, amount, now, interest);
        Ok(position)
    }

    /// Debit `account`'s deposit and send `amount` back to it
    pub fn withdraw(
        &self,
        account: &AccountId,
        amount: Amount,
    ) -> Result<AccountPosition, LedgerError> {
        ensure_positive(Operation::Withdraw, amount)?;

        let mut state = self.state.lock();
        let now = self.clock.now();
        let mut position = state.position(account);
        let mut totals = state.totals;

        let interest = position.settle_deposit(now, self.rate)?;
        let available = position.deposit_principal_and_interest;
        if amount > available {
            return Err(self.rejected(
                Operation::Withdraw,
                account,
                amount,
                LedgerError::InsufficientBalance {
                    requested: amount,
                    available,
                },
            ));
        }

        totals.total_deposited = totals
            .total_deposited
            .checked_add(interest)
            .ok_or(LedgerError::MathOverflow)?;
        self.ensure_liquidity(Operation::Withdraw, account, amount, &totals)?;

        position.deposit_principal_and_interest = available - amount;
        totals.total_deposited = totals
            .total_deposited
            .checked_sub(amount)
            .ok_or(LedgerError::MathOverflow)?;

        self.token
            .transfer(&self.pool_account, account, amount)
            .map_err(|e| self.rejected(Operation::Withdraw, account, amount, e.into()))?;

        self.finish(&mut state, account, position, totals, Operation::Withdraw, amount, now, interest);
        Ok(position)
    }

    /// Lend `amount` of pooled liquidity to `account`.
    ///
    /// Any account may borrow up to the pool-wide spare capacity; no deposit
    /// of its own is required.
    pub fn borrow(
        &self,
        account: &AccountId,
        amount: Amount,
    ) -> Result<AccountPosition, LedgerError> {
        ensure_positive(Operation::Borrow, amount)?;

        let mut state = self.state.lock();
        let now = self.clock.now();
        let mut position = state.position(account);
        let mut totals = state.totals;

        let interest = position.settle_borrow(now, self.rate)?;
        totals.total_borrowed = totals
            .total_borrowed
            .checked_add(interest)
            .ok_or(LedgerError::MathOverflow)?;
        self.ensure_liquidity(Operation::Borrow, account, amount, &totals)?;

        position.borrow_principal_and_interest = position
            .borrow_principal_and_interest
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        totals.total_borrowed = totals
            .total_borrowed
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;

        self.token
            .transfer(&self.pool_account, account, amount)
            .map_err(|e| self.rejected(Operation::Borrow, account, amount, e.into()))?;

        self.finish(&mut state, account, position, totals, Operation::Borrow, amount, now, interest);
        Ok(position)
    }

    /// Pull `amount` from `account` against its settled debt
    pub fn repay(
        &self,
        account: &AccountId,
        amount: Amount,
    ) -> Result<AccountPosition, LedgerError> {
        ensure_positive(Operation::Repay, amount)?;

        let mut state = self.state.lock();
        let now = self.clock.now();
        let mut position = state.position(account);
        let mut totals = state.totals;

        let interest = position.settle_borrow(now, self.rate)?;
        let owed = position.borrow_principal_and_interest;
        if amount > owed {
            return Err(self.rejected(
                Operation::Repay,
                account,
                amount,
                LedgerError::ExcessiveRepayment {
                    requested: amount,
                    owed,
                },
            ));
        }

        position.borrow_principal_and_interest = owed - amount;
        totals.total_borrowed = totals
            .total_borrowed
            .checked_add(interest)
            .and_then(|total| total.checked_sub(amount))
            .ok_or(LedgerError::MathOverflow)?;

        self.token
            .transfer_from(&self.pool_account, account, &self.pool_account, amount)
            .map_err(|e| self.rejected(Operation::Repay, account, amount, e.into()))?;

        self.finish(&mut state, account, position, totals, Operation::Repay, amount, now, interest);
        Ok(position)
    }

    // =========================================================================
    // Queries (no settlement, no side effects)
    // =========================================================================

    /// Sum of settled deposit balances
    pub fn total_pool_balance(&self) -> Amount {
        self.state.lock().totals.total_deposited
    }

    /// Sum of settled borrow balances
    pub fn total_borrow_balance(&self) -> Amount {
        self.state.lock().totals.total_borrowed
    }

    pub fn available_liquidity(&self) -> Amount {
        self.state.lock().totals.available_liquidity()
    }

    pub fn totals(&self) -> PoolTotals {
        self.state.lock().totals
    }

    /// Stored position; default for accounts never seen
    pub fn position(&self, account: &AccountId) -> AccountPosition {
        self.state.lock().position(account)
    }

    /// Settled deposit balance as of the account's last action
    pub fn deposit_balance(&self, account: &AccountId) -> Amount {
        self.position(account).deposit_principal_and_interest
    }

    /// Settled borrow balance as of the account's last action
    pub fn borrow_balance(&self, account: &AccountId) -> Amount {
        self.position(account).borrow_principal_and_interest
    }

    /// Position as it would read if both sides were settled now. Nothing is written.
    pub fn projected_position(&self, account: &AccountId) -> Result<AccountPosition, LedgerError> {
        let position = self.position(account);
        position.projected(self.clock.now(), self.rate)
    }

    /// Every account with a recorded position
    pub fn accounts(&self) -> Vec<(AccountId, AccountPosition)> {
        let state = self.state.lock();
        state
            .positions
            .iter()
            .map(|(account, position)| (account.clone(), *position))
            .collect()
    }

    /// Retained journal, oldest first
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.state.lock().events.iter().cloned().collect()
    }

    /// The newest `limit` retained events, oldest first
    pub fn recent_events(&self, limit: usize) -> Vec<LedgerEvent> {
        let state = self.state.lock();
        let skip = state.events.len().saturating_sub(limit);
        state.events.iter().skip(skip).cloned().collect()
    }

    /// Tokens actually held by the pool account
    pub fn custody_balance(&self) -> Amount {
        self.token.balance_of(&self.pool_account)
    }

    pub fn interest_rate(&self) -> Rate {
        self.rate
    }

    pub fn pool_account(&self) -> &AccountId {
        &self.pool_account
    }

    pub fn token_symbol(&self) -> &str {
        self.token.symbol()
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        let custody_balance = self.custody_balance();
        let state = self.state.lock();
        PoolSnapshot {
            token_symbol: self.token.symbol().to_string(),
            pool_account: self.pool_account.clone(),
            annual_rate_bps: self.rate.as_bps(),
            total_deposited: state.totals.total_deposited,
            total_borrowed: state.totals.total_borrowed,
            available_liquidity: state.totals.available_liquidity(),
            custody_balance,
            utilization_pct: state.totals.utilization_pct(),
            account_count: state.positions.len(),
            event_count: state.next_sequence,
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Outgoing transfers are bounded by the aggregate and by literal custody
    fn ensure_liquidity(
        &self,
        operation: Operation,
        account: &AccountId,
        amount: Amount,
        totals: &PoolTotals,
    ) -> Result<(), LedgerError> {
        let aggregate = totals.available_liquidity();
        let custody = self.token.balance_of(&self.pool_account);
        let available = aggregate.min(custody);
        if amount > available {
            return Err(self.rejected(
                operation,
                account,
                amount,
                LedgerError::InsufficientLiquidity {
                    requested: amount,
                    available,
                },
            ));
        }
        Ok(())
    }

    fn rejected(
        &self,
        operation: Operation,
        account: &AccountId,
        amount: Amount,
        error: LedgerError,
    ) -> LedgerError {
        tracing::debug!(
            operation = %operation,
            account = %account,
            amount = %amount,
            error = %error,
            "Ledger operation rejected"
        );
        error
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        state: &mut LedgerState,
        account: &AccountId,
        position: AccountPosition,
        totals: PoolTotals,
        operation: Operation,
        amount: Amount,
        now: Timestamp,
        interest: Amount,
    ) {
        if interest > 0 {
            tracing::debug!(account = %account, interest = %interest, "Settled accrued interest");
        }
        let event = state.commit(
            account,
            position,
            totals,
            operation,
            amount,
            now,
            self.event_capacity,
        );
        tracing::info!(
            sequence = event.sequence,
            operation = %event.operation,
            account = %event.account,
            amount = %event.amount,
            "Ledger event"
        );
    }
}

fn ensure_positive(operation: Operation, amount: Amount) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount {
            operation: operation.as_str(),
        });
    }
    Ok(())
}
