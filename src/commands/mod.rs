//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `fileset`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the global
//!   `--color` value and performs the command's logic.
//!
//! All commands are read-only: they load a config file, resolve it with the
//! `fileset_resolver` library and print the result.

pub mod dest;
pub mod ls;
pub mod owns;

use anyhow::Result;
use std::path::Path;

use fileset_resolver::config;
use fileset_resolver::suggestions;
use fileset_resolver::Ruleset;

/// Load the config file at `config_path` and validate it into rulesets.
pub fn load_rulesets(config_path: &Path) -> Result<Vec<Ruleset>> {
    if !config_path.exists() {
        return Err(suggestions::config_not_found(config_path));
    }

    let config = config::from_file(config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load config from {}: {}",
            config_path.display(),
            e
        )
    })?;

    config.rulesets().map_err(suggestions::explain)
}
