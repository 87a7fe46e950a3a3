//! Binary crate for the `metar` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Printing the rendered reports

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

/// Log filter when neither `--verbose` nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "metar=warn,metar_core=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    // Logs go to stderr, stdout carries only the report.
    let filter = if cmd.report.verbose {
        EnvFilter::new("metar=debug,metar_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}
