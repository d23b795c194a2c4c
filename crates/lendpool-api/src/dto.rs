//! Data Transfer Objects for API requests and responses
//!
//! Token amounts are raw units encoded as decimal strings.

use lending::{AccountPosition, LedgerEvent, PoolSnapshot};
use lendpool_core::LedgerError;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub pool_account: String,
    pub token_symbol: String,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

impl From<&LedgerError> for ApiError {
    fn from(err: &LedgerError) -> Self {
        Self::new(err.error_code(), err.to_string())
    }
}

/// Body for deposit, withdraw, borrow and repay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Calling account
    pub account: String,
    pub amount: String,
}

/// Position with string amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDto {
    pub deposit_balance: String,
    pub deposit_last_update: u64,
    pub borrow_balance: String,
    pub borrow_last_update: u64,
}

impl From<AccountPosition> for PositionDto {
    fn from(position: AccountPosition) -> Self {
        Self {
            deposit_balance: position.deposit_principal_and_interest.to_string(),
            deposit_last_update: position.deposit_last_update,
            borrow_balance: position.borrow_principal_and_interest.to_string(),
            borrow_last_update: position.borrow_last_update,
        }
    }
}

/// Result of a committed operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub operation: String,
    pub account: String,
    /// Raw requested amount
    pub amount: String,
    /// Position after the operation
    pub position: PositionDto,
}

/// GET /ledger/balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub total_deposited: String,
}

/// GET /ledger/borrow-balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowBalanceResponse {
    pub total_borrowed: String,
}

/// Stored versus settled-now view of one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionResponse {
    pub account: String,
    /// As of the account's last action
    pub settled: PositionDto,
    /// As if settled right now
    pub projected: PositionDto,
}

/// Pool summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolResponse {
    pub token_symbol: String,
    pub pool_account: String,
    pub annual_rate_bps: String,
    pub total_deposited: String,
    pub total_borrowed: String,
    pub available_liquidity: String,
    pub custody_balance: String,
    pub utilization_pct: f64,
    pub account_count: usize,
    pub event_count: u64,
}

impl From<PoolSnapshot> for PoolResponse {
    fn from(snapshot: PoolSnapshot) -> Self {
        Self {
            token_symbol: snapshot.token_symbol,
            pool_account: snapshot.pool_account.to_string(),
            annual_rate_bps: snapshot.annual_rate_bps.to_string(),
            total_deposited: snapshot.total_deposited.to_string(),
            total_borrowed: snapshot.total_borrowed.to_string(),
            available_liquidity: snapshot.available_liquidity.to_string(),
            custody_balance: snapshot.custody_balance.to_string(),
            utilization_pct: snapshot.utilization_pct,
            account_count: snapshot.account_count,
            event_count: snapshot.event_count,
        }
    }
}

/// Journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub sequence: u64,
    pub operation: String,
    pub account: String,
    pub amount: String,
    pub timestamp: u64,
}

impl From<LedgerEvent> for EventDto {
    fn from(event: LedgerEvent) -> Self {
        Self {
            sequence: event.sequence,
            operation: event.operation.to_string(),
            account: event.account.to_string(),
            amount: event.amount.to_string(),
            timestamp: event.timestamp,
        }
    }
}

/// Query for GET /ledger/events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsQuery {
    /// Newest entries to return (defaults to 100)
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventDto>,
}

/// Wallet balance and the allowance granted to the pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalanceResponse {
    pub account: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub balance: String,
    pub pool_allowance: String,
}

/// Approve the pool to pull tokens. "max" grants an unlimited allowance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    pub owner: String,
    pub amount: String,
}
