//! # File Set Building
//!
//! Runs the full pipeline for one ruleset:
//!
//! 1. normalize the entries into patterns;
//! 2. expand every pattern against the filesystem;
//! 3. union the candidates (unit order, then enumeration order), dropping
//!    duplicate absolute paths;
//! 4. resolve each candidate's destination against the whole pattern list.
//!
//! When two sources land on the same destination (compared ASCII
//! case-insensitively) the later one wins and the earlier one is dropped.
//!
//! [`resolve_layers`] repeats this for several rulesets and records each one
//! as a row of an [`OverrideIndex`].

use crate::destination::dest_for_patterns;
use crate::entry::FileEntry;
use crate::error::Result;
use crate::glob_resolver;
use crate::normalize::{absolute_posix, normalize_in};
use crate::override_index::OverrideIndex;
use crate::path;
use crate::pattern::Pattern;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A selected file and its place in the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedFile {
    /// Absolute posix path of the source file.
    pub src: String,
    /// Relative posix path in the output.
    pub dest: String,
}

impl ResolvedFile {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

/// One independently resolved pattern list and the root it resolves against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub root: PathBuf,
    pub entries: Vec<FileEntry>,
}

impl Ruleset {
    pub fn new(root: impl Into<PathBuf>, entries: Vec<FileEntry>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    /// Resolve this ruleset on its own.
    pub fn resolve(&self) -> Result<Vec<ResolvedFile>> {
        resolve(&self.root, &self.entries)
    }
}

/// Resolve `entries` against `root` into a deduplicated file list.
pub fn resolve(root: impl AsRef<Path>, entries: &[FileEntry]) -> Result<Vec<ResolvedFile>> {
    let root = absolute_posix(root.as_ref())?;
    let patterns = normalize_in(entries, &root)?;
    resolve_patterns(&patterns, &root)
}

/// Resolve already normalized patterns against an absolute posix root.
pub fn resolve_patterns(patterns: &[Pattern], root: &str) -> Result<Vec<ResolvedFile>> {
    let candidates = glob_resolver::expand(patterns, root)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut slots: Vec<Option<ResolvedFile>> = Vec::new();
    let mut by_dest: HashMap<String, usize> = HashMap::new();

    for src in candidates.values().flatten() {
        if !seen.insert(src.as_str()) {
            continue;
        }
        let Some(dest) = dest_for_patterns(src, patterns, root)? else {
            continue;
        };

        let key = path::key(&dest);
        if let Some(previous) = by_dest.insert(key, slots.len()) {
            if let Some(dropped) = slots[previous].take() {
                debug!(
                    "destination {:?} claimed by {} replaces {}",
                    dest, src, dropped.src
                );
            }
        }
        slots.push(Some(ResolvedFile::new(src.clone(), dest)));
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Resolve each ruleset independently and index the results, one row per
/// ruleset in the given order. Later rows take priority over earlier ones.
pub fn resolve_layers(rulesets: &[Ruleset]) -> Result<OverrideIndex<Ruleset>> {
    let resolved = rulesets
        .par_iter()
        .map(Ruleset::resolve)
        .collect::<Result<Vec<_>>>()?;

    let identities = rulesets.to_vec();
    OverrideIndex::with_data(identities, resolved.into_iter().map(Some).collect())
}
