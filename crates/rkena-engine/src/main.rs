//! # Rkena
//!
//! Runs Rkena MMA matches headless: the AI opponent against an autopilot or
//! idle human corner, logging the fight and printing a JSON summary.
//!
//! Usage: `rkena [config.toml]` (defaults to `rkena.toml` in the working
//! directory). Set `RUST_LOG` to adjust verbosity.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use rkena_engine::config::{EngineConfig, CONFIG_FILE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("rkena=info".parse()?))
        .init();

    info!("Rkena MMA starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let mut config = EngineConfig::load_from(&path);
    config.validate()?;

    let summary = rkena_engine::run(&config)?;
    if config.print_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    info!("Rkena MMA shutdown complete");
    Ok(())
}
