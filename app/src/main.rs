use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lendpool_core::AppConfig;

#[derive(Parser)]
#[command(name = "lendpool")]
#[command(about = "Pooled token lending ledger")]
struct Cli {
    /// JSON configuration file (defaults apply when omitted)
    #[arg(long, env = "LENDPOOL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API port from the configuration
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lendpool=debug".parse()?)
                .add_directive("lending=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(port) = cli.port {
        config.api_port = port;
    }

    lendpool_lib::run(config).await
}
