//! CRONOS command line client
//!
//! Shrimp marketplace client for konsumen, petambak, logistik and admin
//! accounts: catalog, checkout, orders, deliveries, wallet and chat.

mod commands;
mod config;
mod shutdown;
mod state;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use commands::Command;
use config::ConfigLoader;
use state::AppState;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// CRONOS - shrimp marketplace client
#[derive(Parser, Debug)]
#[command(name = "cronos")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./cronos.toml", env = "CRONOS_CONFIG")]
    config: PathBuf,

    /// Override the API base URL (e.g. https://cronos.example.com/api)
    #[arg(long, env = "CRONOS_API_URL")]
    api_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let args = Args::parse();
    tracing::debug!("Starting cronos v{}", env!("CARGO_PKG_VERSION"));

    let loaded_config = ConfigLoader::new(&args.config, args.api_url)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::debug!(api = %loaded_config.api.base_url, "Configuration loaded from {:?}", args.config);

    let state = AppState::new(loaded_config)?;

    match commands::run(args.command, &state).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("[error] {e}");
            }
            tracing::debug!(error = ?e, "Command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
