//! Life Simulator CLI
//!
//! Headless front-end for the life simulation engine. Reports go to stdout,
//! logs go to stderr.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init()
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = cli.global.load_config()?;

    match cli.command {
        Commands::Run(args) => commands::run_single(config, args),
        Commands::Batch(args) => commands::run_batch(config, args),
    }
}
