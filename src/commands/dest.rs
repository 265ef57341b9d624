//! # Dest Command Implementation
//!
//! This module implements the `dest` subcommand, which evaluates a single file
//! against every ruleset of a configuration and prints the output path each
//! ruleset assigns to it. No directory is walked; only the file itself is
//! checked against the pattern lists.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use fileset_resolver::defaults::DEFAULT_CONFIG_FILENAME;
use fileset_resolver::output::OutputConfig;
use fileset_resolver::{get_dest_path, path, suggestions};

/// Show the destination each ruleset assigns to a file
#[derive(Args, Debug)]
pub struct DestArgs {
    /// The file to evaluate. Relative paths resolve against the current directory.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Path to the fileset.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILENAME,
        env = "FILESET_CONFIG"
    )]
    pub config: PathBuf,
}

/// Execute the `dest` command.
pub fn execute(args: DestArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let rulesets = super::load_rulesets(&args.config)?;

    for (row, ruleset) in rulesets.iter().enumerate() {
        let dest = get_dest_path(&args.file, &ruleset.entries, &ruleset.root)
            .map_err(suggestions::explain)?;
        let root = path::path_to_posix(&ruleset.root);
        match dest {
            Some(dest) => println!("[{}] {}: {}", row, root, out.dest(&dest)),
            None => println!("[{}] {}: not selected", row, root),
        }
    }

    Ok(())
}
