//! lendpool-api: HTTP API layer for the lendpool ledger
//!
//! Stands in for the wallet/UI caller: issues the four mutating operations on
//! behalf of an explicit account and serves the aggregate balance queries.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{ApiError, AppState};
