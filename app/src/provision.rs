//! Token and pool provisioning
//!
//! Mints the token supply to the deployer, creates the ledger, moves the
//! initial funding into pool custody and optionally writes a deployment record.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use lending::{InMemoryToken, Ledger, TokenTransfer};
use lendpool_core::{AccountId, AppConfig};
use serde::{Deserialize, Serialize};

/// What was deployed, written next to the service for other tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub token_symbol: String,
    pub token_name: String,
    pub pool_account: AccountId,
    pub deployer: AccountId,
    pub annual_rate_bps: u32,
}

/// A ready-to-serve ledger and the token it custodies
pub struct Provisioned {
    pub token: Arc<InMemoryToken>,
    pub ledger: Arc<Ledger>,
    pub record: DeploymentRecord,
}

/// Build the token and ledger described by `config`
pub fn provision(config: &AppConfig) -> anyhow::Result<Provisioned> {
    config.validate().context("Invalid configuration")?;

    let ledger_config = &config.ledger;
    let setup = &config.provisioning;

    let token = Arc::new(
        InMemoryToken::with_initial_supply(
            ledger_config.token_name.clone(),
            ledger_config.token_symbol.clone(),
            &setup.deployer,
            setup.initial_supply,
        )
        .context("Failed to mint initial supply")?,
    );
    tracing::info!(
        token = %token.symbol(),
        deployer = %setup.deployer,
        supply = %setup.initial_supply,
        "Token deployed"
    );

    let ledger = Arc::new(Ledger::from_config(token.clone(), ledger_config));
    tracing::info!(
        pool = %ledger.pool_account(),
        rate = %ledger.interest_rate(),
        "Ledger created"
    );

    if setup.initial_funding > 0 {
        token
            .transfer(&setup.deployer, ledger.pool_account(), setup.initial_funding)
            .context("Failed to fund pool")?;
    }
    tracing::info!(
        deployer_balance = %token.balance_of(&setup.deployer),
        pool_balance = %ledger.custody_balance(),
        "Pool funded"
    );

    let record = DeploymentRecord {
        token_symbol: ledger_config.token_symbol.clone(),
        token_name: ledger_config.token_name.clone(),
        pool_account: ledger_config.pool_account.clone(),
        deployer: setup.deployer.clone(),
        annual_rate_bps: ledger_config.annual_rate_bps,
    };

    if let Some(path) = &setup.record_path {
        write_record(path, &record)?;
    }

    Ok(Provisioned {
        token,
        ledger,
        record,
    })
}

/// Write the record as pretty JSON
pub fn write_record(path: &Path, record: &DeploymentRecord) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write deployment record to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Deployment record written");
    Ok(())
}
