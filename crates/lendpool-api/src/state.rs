//! Application state shared across API handlers

use std::sync::Arc;

use lending::{InMemoryToken, Ledger};
use lendpool_core::{AccountId, Amount};
use thiserror::Error;

/// Longest accepted account identifier
const MAX_ACCOUNT_LEN: usize = 64;

/// Errors that can occur in the API layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// Account identifier failed validation
    #[error("Invalid account: {reason}")]
    InvalidAccount { reason: String },

    /// Amount was not a decimal integer of raw units
    #[error("Invalid amount '{value}': expected raw token units")]
    InvalidAmount { value: String },
}

/// Validate an account identifier taken from a request.
///
/// Accepts 1..=64 characters of ASCII letters, digits, '-', '_' and '.'.
pub fn parse_account(raw: &str) -> Result<AccountId, ApiError> {
    let len = raw.len();
    if len == 0 {
        return Err(ApiError::InvalidAccount {
            reason: "Account must not be empty".to_string(),
        });
    }
    if len > MAX_ACCOUNT_LEN {
        return Err(ApiError::InvalidAccount {
            reason: format!("Account too long ({} chars, maximum {})", len, MAX_ACCOUNT_LEN),
        });
    }
    if let Some(c) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(ApiError::InvalidAccount {
            reason: format!("Invalid character '{}' in account", c),
        });
    }
    Ok(AccountId::new(raw))
}

/// Parse a raw-unit amount. Amounts travel as strings since they exceed
/// what JSON numbers carry safely.
pub fn parse_amount(raw: &str) -> Result<Amount, ApiError> {
    raw.trim().parse::<Amount>().map_err(|_| ApiError::InvalidAmount {
        value: raw.to_string(),
    })
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    ledger: Arc<Ledger>,
    token: Arc<InMemoryToken>,
}

impl AppState {
    /// Wrap a provisioned ledger and the token it custodies
    pub fn new(ledger: Arc<Ledger>, token: Arc<InMemoryToken>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { ledger, token }),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.inner.ledger
    }

    pub fn token(&self) -> &InMemoryToken {
        &self.inner.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account() {
        assert_eq!(parse_account("user_1.eth").unwrap().as_str(), "user_1.eth");
        assert!(matches!(
            parse_account(""),
            Err(ApiError::InvalidAccount { .. })
        ));
        assert!(matches!(
            parse_account("bad account"),
            Err(ApiError::InvalidAccount { .. })
        ));
        assert!(parse_account(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000").unwrap(), 1000);
        assert_eq!(
            parse_amount("1000000000000000000000000").unwrap(),
            1_000_000_000_000_000_000_000_000
        );
        assert!(parse_amount("max").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("1.5").is_err());
    }
}
