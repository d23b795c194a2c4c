//! Core type definitions for lendpool

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw token units (18-decimal fixed point for the reference token)
pub type Amount = u128;

/// Seconds since the Unix epoch. Zero means "never".
pub type Timestamp = u64;

/// Opaque account identity (address-like key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Annual interest rate in WAD (1e18) fixed point.
///
/// `Rate::from_bps(500)` is 5% per annum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u128);

impl Rate {
    /// Build from basis points (1 bps = 0.01%)
    pub const fn from_bps(bps: u32) -> Self {
        Self(bps as u128 * constants::WAD / constants::BPS_DENOMINATOR)
    }

    pub const fn as_wad(&self) -> u128 {
        self.0
    }

    /// Rate expressed in basis points, rounded down
    pub const fn as_bps(&self) -> u128 {
        self.0 * constants::BPS_DENOMINATOR / constants::WAD
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bps = self.as_bps();
        write!(f, "{}.{:02}%", bps / 100, bps % 100)
    }
}

/// Constants
pub mod constants {
    use super::Amount;

    /// Fixed-point scale (18 decimals)
    pub const WAD: u128 = 1_000_000_000_000_000_000;

    /// 1 token in raw units
    pub const UNITS_PER_TOKEN: Amount = WAD;

    /// Basis points per whole
    pub const BPS_DENOMINATOR: u128 = 10_000;

    /// 365 days
    pub const SECONDS_PER_YEAR: u64 = 31_536_000;

    /// Default annual rate (5%)
    pub const DEFAULT_ANNUAL_RATE_BPS: u32 = 500;

    /// Journal entries kept in memory
    pub const DEFAULT_MAX_EVENTS: usize = 10_000;
}

/// Convert whole tokens to raw units
pub const fn tokens(whole: u128) -> Amount {
    whole * constants::UNITS_PER_TOKEN
}
