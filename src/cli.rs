//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Fileset - Inspect which project files a packaged build contains
#[derive(Parser, Debug)]
#[command(name = "fileset")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace). `RUST_LOG` takes precedence.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the files selected by the configuration
    Ls(commands::ls::LsArgs),

    /// Show the destination each ruleset assigns to one file
    Dest(commands::dest::DestArgs),

    /// Show the output paths a source file currently owns
    Owns(commands::owns::OwnsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Ls(args) => commands::ls::execute(args, &self.color),
            Commands::Dest(args) => commands::dest::execute(args, &self.color),
            Commands::Owns(args) => commands::owns::execute(args, &self.color),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init()
        .ok();
}
