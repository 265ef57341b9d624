//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::DEFAULT);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Uses the built-in default file list.
    pub const DEFAULT: &str = "root_dir: .\n";

    /// Everything below the root except debug sources.
    pub const ALL_BUT_DEBUG: &str = r#"
files:
  - "**/*"
  - "!source/debug*.brs"
"#;

    /// A base ruleset with a flavor layered on top.
    pub const LAYERED: &str = r#"
root_dir: app
files:
  - manifest
  - "source/**/*"
  - src: "../shared/**/*"
    dest: lib/
rulesets:
  - root_dir: ../flavor
    files:
      - "**/*"
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "files: [unclosed";
}

/// A test fixture that provides a temporary directory with optional config.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(configs::ALL_BUT_DEBUG)
///     .with_file("manifest", "title=demo");
///
/// fixture.command().arg("ls").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `fileset.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("fileset.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add several files whose content is their own path.
    #[allow(dead_code)]
    pub fn with_files(self, paths: &[&str]) -> Self {
        paths
            .iter()
            .fold(self, |fixture, path| fixture.with_file(path, path))
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("fileset.yaml")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fileset");
        cmd.current_dir(self.path())
            .env_remove("FILESET_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
