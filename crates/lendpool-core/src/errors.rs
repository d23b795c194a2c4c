//! Error types for lendpool

use thiserror::Error;

use crate::Amount;

/// Core errors that can occur in lendpool
#[derive(Debug, Error)]
pub enum Error {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Ledger operation failures. Every variant aborts the operation with no
/// state change and no event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("{operation} amount must be greater than 0")]
    InvalidAmount { operation: &'static str },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: Amount, available: Amount },

    #[error("Repay amount exceeds borrowed amount: requested {requested}, owed {owed}")]
    ExcessiveRepayment { requested: Amount, owed: Amount },

    #[error("Token transfer failed: {0}")]
    TransferFailure(#[from] TokenError),

    #[error("Math operation overflow")]
    MathOverflow,
}

/// Failures reported by the token transfer capability
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("transfer amount exceeds balance: need {required}, have {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("insufficient allowance: need {required}, approved {approved}")]
    InsufficientAllowance { required: Amount, approved: Amount },

    #[error("token supply overflow")]
    Overflow,
}

/// Result type alias for lendpool operations
pub type Result<T> = std::result::Result<T, Error>;

impl LedgerError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientLiquidity { .. } => "insufficient_liquidity",
            Self::ExcessiveRepayment { .. } => "excessive_repayment",
            Self::TransferFailure(_) => "transfer_failure",
            Self::MathOverflow => "math_overflow",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } => 400,
            Self::TransferFailure(_) => 402,
            Self::InsufficientBalance { .. }
            | Self::InsufficientLiquidity { .. }
            | Self::ExcessiveRepayment { .. } => 422,
            Self::MathOverflow => 500,
        }
    }
}
