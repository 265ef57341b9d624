//! # File Entries
//!
//! A file entry is one element of a ruleset's `files` list, in one of the
//! two shapes users write:
//!
//! ```yaml
//! files:
//!   - "source/**/*"            # bare glob, `!` prefix negates
//!   - src: "../shared/**/*"     # object form
//!     dest: lib
//!   - src: ["a.brs", "b.brs"]   # several sources sharing one dest
//!     dest: source/
//! ```
//!
//! Untyped input (JSON or YAML values) is validated once, here, into
//! [`FileEntry`]. Nothing downstream inspects raw shapes again.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One or many `src` globs of an object entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Src {
    One(String),
    Many(Vec<String>),
}

impl Src {
    /// The globs in declaration order.
    pub fn globs(&self) -> &[String] {
        match self {
            Src::One(glob) => std::slice::from_ref(glob),
            Src::Many(globs) => globs,
        }
    }
}

/// A validated file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// A bare glob, confined to the root. A leading `!` negates it.
    Glob(String),
    /// A `{src, dest}` object. An omitted `dest` keeps the structure from
    /// the root.
    SrcDest {
        src: Src,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dest: Option<String>,
    },
}

impl FileEntry {
    /// Build an object entry with a single `src`.
    pub fn src_dest(src: impl Into<String>, dest: Option<&str>) -> Self {
        FileEntry::SrcDest {
            src: Src::One(src.into()),
            dest: dest.map(str::to_string),
        }
    }

    /// Number of patterns this entry expands into.
    pub fn pattern_count(&self) -> usize {
        match self {
            FileEntry::Glob(_) => 1,
            FileEntry::SrcDest { src, .. } => src.globs().len(),
        }
    }

    /// Validate one untyped entry. `index` is only used in error messages.
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let invalid = |message: String| Error::Validation { index, message };

        match value {
            Value::String(glob) => {
                if glob.trim().is_empty() {
                    return Err(invalid("pattern must not be empty".to_string()));
                }
                Ok(FileEntry::Glob(glob.clone()))
            }
            Value::Object(map) => {
                let src = match map.get("src") {
                    None | Some(Value::Null) => {
                        return Err(invalid("object entry is missing `src`".to_string()))
                    }
                    Some(Value::String(glob)) => Src::One(glob.clone()),
                    Some(Value::Array(items)) => {
                        let mut globs = Vec::with_capacity(items.len());
                        for (i, item) in items.iter().enumerate() {
                            match item {
                                Value::String(glob) => globs.push(glob.clone()),
                                other => {
                                    return Err(invalid(format!(
                                        "src[{}] must be a string, found {}",
                                        i,
                                        type_name(other)
                                    )))
                                }
                            }
                        }
                        Src::Many(globs)
                    }
                    Some(other) => {
                        return Err(invalid(format!(
                            "src must be a string or an array of strings, found {}",
                            type_name(other)
                        )))
                    }
                };

                let dest = match map.get("dest") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(dest)) => Some(dest.clone()),
                    Some(other) => {
                        return Err(invalid(format!(
                            "dest must be a string, found {}",
                            type_name(other)
                        )))
                    }
                };

                Ok(FileEntry::SrcDest { src, dest })
            }
            other => Err(invalid(format!(
                "entry must be a glob string or a {{src, dest}} object, found {}",
                type_name(other)
            ))),
        }
    }

    /// Validate a whole list of untyped entries, preserving order.
    pub fn from_values(values: &[Value]) -> Result<Vec<Self>> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| Self::from_value(index, value))
            .collect()
    }
}

impl From<&str> for FileEntry {
    fn from(glob: &str) -> Self {
        FileEntry::Glob(glob.to_string())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
