//! CarPak CLI - Command-line interface for the resource unifier

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "carpak")]
#[command(about = "CarPak: unify FiveM vehicle resources into one merged resource", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the CarPak CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
