//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent a `fileset.yaml`
//! (or `fileset.json`) file and the logic for loading it.
//!
//! ```yaml
//! root_dir: app              # relative to the config file
//! files:                     # base ruleset
//!   - "source/**/*"
//!   - "!source/debug.brs"
//!   - src: "../shared/**/*"
//!     dest: lib
//! rulesets:                  # further layers; later ones take priority
//!   - root_dir: flavors/blue # relative to `root_dir`
//!     files: ["**/*"]
//! ```
//!
//! `files` lists are kept as raw values until [`Config::rulesets`] validates
//! them, so that shape mistakes are reported with the index of the offending
//! entry rather than as an opaque deserialization failure.

use crate::defaults::default_files;
use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::fileset::Ruleset;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// An additional ruleset layered above the base one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Root of this layer, relative to the base `root_dir`. Defaults to it.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    /// Entries of this layer.
    pub files: Vec<Value>,
}

/// The complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory all relative patterns resolve against.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    /// Entries of the base ruleset.
    #[serde(default)]
    pub files: Option<Vec<Value>>,
    /// Further rulesets, lowest priority first.
    #[serde(default)]
    pub rulesets: Vec<RulesetConfig>,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            files: None,
            rulesets: Vec::new(),
        }
    }
}

impl Config {
    /// Validate every layer into a [`Ruleset`], base layer first.
    ///
    /// The base layer uses the default file list when neither `files` nor
    /// `rulesets` is given; with only `rulesets`, there is no base layer.
    pub fn rulesets(&self) -> Result<Vec<Ruleset>> {
        let mut rulesets = Vec::with_capacity(self.rulesets.len() + 1);

        match &self.files {
            Some(values) => rulesets.push(Ruleset::new(
                self.root_dir.clone(),
                FileEntry::from_values(values)?,
            )),
            None if self.rulesets.is_empty() => {
                rulesets.push(Ruleset::new(self.root_dir.clone(), default_files()))
            }
            None => {}
        }

        for layer in &self.rulesets {
            let root = match &layer.root_dir {
                Some(dir) => self.root_dir.join(dir),
                None => self.root_dir.clone(),
            };
            rulesets.push(Ruleset::new(root, FileEntry::from_values(&layer.files)?));
        }

        Ok(rulesets)
    }

    /// Make `root_dir` absolute relative to `base` when it is relative.
    pub fn rebase(&mut self, base: &Path) {
        if self.root_dir.is_relative() {
            self.root_dir = base.join(&self.root_dir);
        }
    }
}

/// Parse a YAML (or JSON) string into a `Config`.
pub fn parse(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("expected a mapping with `root_dir`, `files` and `rulesets` keys".to_string()),
    })
}

/// Load a config file. `.json` files are read as JSON, anything else as YAML.
///
/// A relative `root_dir` is resolved against the file's directory.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::fs(path, e))?;

    let mut config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)?
    } else {
        parse(&content)?
    };

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.rebase(base);
    Ok(config)
}
