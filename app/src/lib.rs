//! Lendpool service
//!
//! Provisions the token and ledger, then serves the HTTP API.

pub mod provision;

pub use provision::{provision, DeploymentRecord, Provisioned};

use lendpool_api::AppState;
use lendpool_core::AppConfig;

/// Provision from `config` and serve until Ctrl-C
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting lendpool");

    let Provisioned { token, ledger, .. } = provision(&config)?;
    let state = AppState::new(ledger, token);

    lendpool_api::start_server(state, config.api_port).await?;
    Ok(())
}
