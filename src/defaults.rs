//! Default values for fileset configuration.
//!
//! This module provides centralized default values used by the library and
//! the CLI commands.

use crate::entry::FileEntry;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "fileset.yaml";

/// Patterns used for the base ruleset when a config names no files at all.
pub const DEFAULT_FILES: &[&str] = &[
    "source/**/*",
    "components/**/*",
    "images/**/*",
    "locale/**/*",
    "fonts/**/*",
    "manifest",
];

/// [`DEFAULT_FILES`] as entries.
pub fn default_files() -> Vec<FileEntry> {
    DEFAULT_FILES.iter().map(|glob| FileEntry::from(*glob)).collect()
}
