//! Command-line driver for the combat simulation.
//!
//! Run with: `combat-sim <command>`. Logs go to stderr and honour `RUST_LOG`
//! (e.g. `RUST_LOG=combat_runtime=debug` prints the full combat log).

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Simulate};

/// Real-time combat simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Run and inspect combat scenarios", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scenario and print its report
    Simulate(Simulate),

    /// Validate content and list attack definitions
    Catalog(Catalog),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Catalog(cmd) => cmd.execute(),
    }
}
