//! Configuration types for lendpool

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ANNUAL_RATE_BPS, DEFAULT_MAX_EVENTS};
use crate::{tokens, AccountId, Amount, Error, Rate};

/// Ledger parameters fixed at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Fixed annual interest rate in basis points (500 = 5%)
    #[serde(default = "default_annual_rate_bps")]
    pub annual_rate_bps: u32,

    /// Account that custodies pooled tokens
    #[serde(default = "default_pool_account")]
    pub pool_account: AccountId,

    #[serde(default = "default_token_name")]
    pub token_name: String,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Event journal capacity; older entries are evicted
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

fn default_annual_rate_bps() -> u32 {
    DEFAULT_ANNUAL_RATE_BPS
}

fn default_pool_account() -> AccountId {
    AccountId::new("lendpool")
}

fn default_token_name() -> String {
    "Mock Token".to_string()
}

fn default_token_symbol() -> String {
    "MTK".to_string()
}

fn default_max_events() -> usize {
    DEFAULT_MAX_EVENTS
}

impl LedgerConfig {
    pub fn interest_rate(&self) -> Rate {
        Rate::from_bps(self.annual_rate_bps)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            annual_rate_bps: default_annual_rate_bps(),
            pool_account: default_pool_account(),
            token_name: default_token_name(),
            token_symbol: default_token_symbol(),
            max_events: default_max_events(),
        }
    }
}

/// Provisioning step run before the ledger starts serving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Account that receives the initial token supply
    #[serde(default = "default_deployer")]
    pub deployer: AccountId,

    /// Raw units minted to the deployer
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Amount,

    /// Raw units moved from the deployer into pool custody
    #[serde(default = "default_initial_funding")]
    pub initial_funding: Amount,

    /// Where to write the deployment record (skipped when unset)
    #[serde(default)]
    pub record_path: Option<PathBuf>,
}

fn default_deployer() -> AccountId {
    AccountId::new("deployer")
}

fn default_initial_supply() -> Amount {
    tokens(1_000_000)
}

fn default_initial_funding() -> Amount {
    tokens(5_000)
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            deployer: default_deployer(),
            initial_supply: default_initial_supply(),
            initial_funding: default_initial_funding(),
            record_path: None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ledger settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Token and pool provisioning
    #[serde(default)]
    pub provisioning: ProvisioningConfig,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    19053
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: AppConfig =
            serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> crate::Result<()> {
        if self.provisioning.initial_funding > self.provisioning.initial_supply {
            return Err(Error::Config(format!(
                "initial_funding {} exceeds initial_supply {}",
                self.provisioning.initial_funding, self.provisioning.initial_supply
            )));
        }
        if self.ledger.max_events == 0 {
            return Err(Error::Config("max_events must be at least 1".to_string()));
        }
        if self.ledger.pool_account == self.provisioning.deployer {
            return Err(Error::Config(
                "pool_account and deployer must differ".to_string(),
            ));
        }
        Ok(())
    }
}
