//! Ledger events
//!
//! Fired exactly once per successful operation. They carry the raw requested
//! amount, never the post-interest balance.

use std::fmt;

use lendpool_core::{AccountId, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// The four mutating ledger operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Deposit,
    Withdraw,
    Borrow,
    Repay,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Borrow => "Borrow",
            Self::Repay => "Repay",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Journal entry for one committed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Position in the journal, starting at 0
    pub sequence: u64,
    pub operation: Operation,
    pub account: AccountId,
    pub amount: Amount,
    pub timestamp: Timestamp,
}
