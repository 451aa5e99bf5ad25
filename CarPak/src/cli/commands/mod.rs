use std::path::PathBuf;

use clap::Subcommand;

pub mod levels;
pub mod unify;

#[derive(Subcommand)]
pub enum Commands {
    /// Merge every resource folder of a level into one unified resource
    Unify {
        /// Level to unify (defaults to the configured level)
        #[arg(short, long)]
        level: Option<String>,

        /// Path to the config file
        #[arg(short, long, default_value = "carpak.toml")]
        config: PathBuf,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the level folders available under the configured base path
    Levels {
        /// Path to the config file
        #[arg(short, long, default_value = "carpak.toml")]
        config: PathBuf,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Unify {
                level,
                config,
                quiet,
            } => unify::execute(level, &config, quiet),
            Commands::Levels { config } => levels::execute(&config),
        }
    }
}
