//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the files a
//! `fileset.yaml` configuration selects and the output path of each.
//!
//! ## Functionality
//!
//! - **File Listing**: Shows the merged output of all rulesets, where a
//!   destination claimed by a later ruleset hides earlier claims
//! - **Single Ruleset**: `--ruleset N` shows one ruleset's own result
//! - **Pattern Filtering**: Supports glob patterns to filter destinations
//! - **Detailed Output**: Optional long format showing source paths
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use fileset_resolver::defaults::DEFAULT_CONFIG_FILENAME;
use fileset_resolver::output::OutputConfig;
use fileset_resolver::{path, resolve_layers, suggestions, IndexEntry};

/// List the files selected by the configuration
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the fileset.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILENAME,
        env = "FILESET_CONFIG"
    )]
    pub config: PathBuf,

    /// Filter destinations by glob pattern (e.g., "*.brs", "source/**/*").
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Use long listing format showing the source of each file.
    #[arg(short, long)]
    pub long: bool,

    /// Show only the total count of files.
    #[arg(long)]
    pub count: bool,

    /// Show only the files of one ruleset (0 is the base ruleset).
    #[arg(short, long, value_name = "N")]
    pub ruleset: Option<usize>,
}

/// Execute the `ls` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: LsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let rulesets = super::load_rulesets(&args.config)?;
    let index = resolve_layers(&rulesets).map_err(suggestions::explain)?;

    let mut files: Vec<(usize, &IndexEntry)> = match args.ruleset {
        Some(row) if row >= index.row_count() => {
            anyhow::bail!(
                "Ruleset {} does not exist; the configuration defines {} ruleset(s)",
                row,
                index.row_count()
            );
        }
        Some(row) => index.entries(row).into_iter().map(|e| (row, e)).collect(),
        None => index.live_entries(),
    };

    if let Some(pattern) = &args.pattern {
        let matcher =
            path::compile(pattern).map_err(|e| suggestions::invalid_glob(pattern, &e))?;
        files.retain(|(_, entry)| path::glob_match(&matcher, &entry.dest));
    }

    files.sort_by(|a, b| path::key(&a.1.dest).cmp(&path::key(&b.1.dest)));

    if args.count {
        println!("{}", files.len());
        return Ok(());
    }

    if files.is_empty() {
        println!("No files selected.");
        return Ok(());
    }

    for line in render(&files, args.long && index.row_count() > 1, args.long, &out) {
        println!("{}", line);
    }

    println!();
    println!(
        "{} file(s) from {} ruleset(s)",
        files.len(),
        index.row_count()
    );

    Ok(())
}

/// Format one line per file: the destination, or in long format
/// `dest <- src`, prefixed with the ruleset number when `show_row` is set.
fn render(
    files: &[(usize, &IndexEntry)],
    show_row: bool,
    long: bool,
    out: &OutputConfig,
) -> Vec<String> {
    files
        .iter()
        .map(|(row, entry)| {
            let mut line = String::new();
            if show_row {
                line.push_str(&format!("[{}] ", row));
            }
            line.push_str(&out.dest(&entry.dest));
            if long {
                line.push_str(" <- ");
                line.push_str(&out.src(&entry.src));
            }
            line
        })
        .collect()
}
