//! Pooled Lending Ledger
//!
//! Users deposit a fungible token into a shared pool, withdraw principal plus
//! yield, borrow against pooled liquidity and repay principal plus interest.
//!
//! # Settlement
//!
//! Interest is simple and settles lazily: every mutating operation first folds
//! the caller's accrued interest into the balance it touches, then applies the
//! requested delta. Aggregate reads never settle anything.

pub mod calculator;
pub mod clock;
pub mod events;
pub mod ledger;
pub mod state;
pub mod token;

// Re-exports
pub use calculator::*;
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{LedgerEvent, Operation};
pub use ledger::Ledger;
pub use state::*;
pub use token::{InMemoryToken, TokenTransfer};
