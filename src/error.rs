//! # Error Handling
//!
//! This module defines the centralized error type for `fileset-resolver`. It
//! uses the `thiserror` library to build a single `Error` enum covering every
//! failure mode of pattern normalization, glob expansion, destination
//! resolution and the override index.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (the
//!   offending pattern, its index, the resolved absolute path) to debug a
//!   multi-layer configuration from the message alone.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Every error aborts the resolution in progress. Nothing is retried and
//! nothing is silently dropped.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fileset resolution
#[derive(Error, Debug)]
pub enum Error {
    /// A file entry had the wrong shape or types.
    ///
    /// `index` is the position of the raw entry in its list.
    #[error("Invalid file entry at index {index}: {message}")]
    Validation { index: usize, message: String },

    /// A top-level string pattern reached outside the root directory.
    #[error(
        "Pattern {index} ({pattern:?}) references a path outside of the root directory: {path}\n  \
         hint: top-level string patterns are confined to the root; use a {{ src, dest }} object instead"
    )]
    OutOfRoot {
        index: usize,
        pattern: String,
        path: String,
    },

    /// An override index was reused with a different ruleset configuration.
    #[error("Override index identity mismatch at row {index}: expected {expected}, found {actual}")]
    IdentityMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// A filesystem operation failed while stating or walking a path.
    #[error("Filesystem error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pattern could not be compiled into a glob matcher.
    #[error("Invalid glob in pattern {index} ({pattern:?}): {source}")]
    Glob {
        index: usize,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A row number outside the fixed row range of an override index.
    #[error("Row {row} is out of range for an override index with {rows} row(s)")]
    RowOutOfRange { row: usize, rows: usize },

    /// An error occurred while parsing a configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileSystem {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Error::FileSystem { path, source }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
