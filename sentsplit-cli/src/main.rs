//! sentsplit command-line entry point

use clap::Parser;
use sentsplit_cli::commands::Commands;

/// Split text into sentences while keeping every source position
#[derive(Debug, Parser)]
#[command(name = "sentsplit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
