mod api;
mod aqi;
mod cli;
mod config;
mod error;
mod models;
mod reference;
mod server;
mod service;

use anyhow::Context;
use clap::Parser;
use cli::{App, Cli};
use config::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Initializing AQI tracker...");

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let app = App::new(config).context("failed to initialize application")?;

    if let Err(e) = app.run(cli.command).await {
        error!("Command execution failed: {:?}", e);
        return Err(e.into());
    }

    Ok(())
}
