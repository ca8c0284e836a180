#![forbid(unsafe_code)]

mod config;
mod constants;
mod error;
mod gui;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::ConfigStore;

/// Always-on-top crosshair overlay with named presets
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding presets.json and last_state.json
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let store = ConfigStore::new(cli.config_dir.unwrap_or_else(ConfigStore::default_dir));
    info!(config_dir = %store.dir().display(), "Starting crosshair overlay");

    gui::run_gui(store)
}
