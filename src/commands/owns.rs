//! # Owns Command Implementation
//!
//! This module implements the `owns` subcommand. It resolves every ruleset of
//! a configuration and prints the output paths the given source file
//! currently provides, leaving out paths a later ruleset fills from another
//! file. A file that owns nothing prints nothing and still succeeds.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use fileset_resolver::defaults::DEFAULT_CONFIG_FILENAME;
use fileset_resolver::normalize::absolute_posix;
use fileset_resolver::output::OutputConfig;
use fileset_resolver::{resolve_layers, suggestions};

/// Show the output paths a source file owns
#[derive(Args, Debug)]
pub struct OwnsArgs {
    /// The source file. Relative paths resolve against the current directory.
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

/// Execute the `owns` command.
pub fn execute(args: OwnsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let rulesets = super::load_rulesets(&args.config)?;
    let index = resolve_layers(&rulesets).map_err(suggestions::explain)?;

    let src = absolute_posix(&args.file)?;
    for dest in index.get_all_dest_for_src(&src) {
        println!("{}", out.dest(&dest));
    }

    Ok(())
}
