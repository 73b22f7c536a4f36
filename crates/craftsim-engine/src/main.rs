//! # CraftSim
//!
//! Command-line entry point: loads recipe files, seeds an inventory from the
//! config and `--give` arguments, then crafts the named recipes in order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use clap::Parser;
use craftsim_engine::app;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    let args = app::Args::parse();
    let (config, config_problem) = app::read_config(&args.config);

    // RUST_LOG wins over the configured filter
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)?,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("CraftSim {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_problem {
        warn!("{e}; using defaults");
    }

    let config = app::merge_args(config, &args);
    app::run(&config, &args)
}
