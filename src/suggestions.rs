//! # Error Suggestions
//!
//! Helpers that turn failures into messages telling the user what went
//! wrong AND how to fix it.
//!
//! ```rust,ignore
//! use fileset_resolver::suggestions;
//!
//! return Err(suggestions::config_not_found(path));
//! ```

use crate::error::Error;
use std::path::Path;

/// Generate an error for when the configuration file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a fileset.yaml file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set FILESET_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for an invalid glob pattern.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern: {pattern}\n\
         error: {error}\n\n\
         hint: Use * for single path component, ** for recursive matching\n\
         hint: Use [abc] for character classes, [!abc] to negate\n\
         hint: Escape literal brackets as \\[ and \\]"
    )
}

/// Convert a library error into a CLI error, attaching hints where one helps.
pub fn explain(error: Error) -> anyhow::Error {
    match &error {
        Error::Glob {
            pattern, source, ..
        } => invalid_glob(pattern, source),
        _ => anyhow::Error::new(error),
    }
}
