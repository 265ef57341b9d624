//! # Glob Expansion
//!
//! Expands normalized patterns into candidate files on disk.
//!
//! Patterns are grouped into *expansion units*: every top-level string forms
//! a single unit positioned at the first of them, every object pattern is a
//! unit of its own. Units are expanded in parallel with `rayon` and share no
//! mutable state; results are keyed by unit index, so the merged order never
//! depends on which unit finished first.
//!
//! Negated patterns contribute no candidates here. Exclusion is decided per
//! file by [`crate::destination`], against the whole pattern list.

use crate::error::{Error, Result};
use crate::path;
use crate::pattern::Pattern;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

/// Candidate files per expansion unit, keyed by unit index.
pub type Candidates = BTreeMap<usize, Vec<String>>;

/// A group of patterns expanded together.
#[derive(Debug)]
pub struct ExpansionUnit<'a> {
    /// Index of the first pattern in the unit.
    pub index: usize,
    pub patterns: Vec<&'a Pattern>,
}

/// Group patterns into expansion units, in pattern order.
pub fn expansion_units(patterns: &[Pattern]) -> Vec<ExpansionUnit<'_>> {
    let mut units: Vec<ExpansionUnit<'_>> = Vec::new();
    let mut top_level_unit: Option<usize> = None;

    for pattern in patterns {
        if pattern.top_level {
            match top_level_unit {
                Some(position) => units[position].patterns.push(pattern),
                None => {
                    top_level_unit = Some(units.len());
                    units.push(ExpansionUnit {
                        index: pattern.index,
                        patterns: vec![pattern],
                    });
                }
            }
        } else {
            units.push(ExpansionUnit {
                index: pattern.index,
                patterns: vec![pattern],
            });
        }
    }

    units
}

/// Fail when a positive top-level pattern reaches outside `root`.
pub fn check_root_containment(unit: &ExpansionUnit<'_>, root: &str) -> Result<()> {
    for pattern in unit.patterns.iter().filter(|p| p.top_level && !p.negated) {
        let reach = if path::has_magic(&pattern.glob) {
            path::literal_prefix(&pattern.glob)
        } else {
            path::unescape(&pattern.glob)
        };
        if !path::is_within(root, &reach) {
            return Err(Error::OutOfRoot {
                index: pattern.index,
                pattern: pattern.source.clone(),
                path: reach,
            });
        }
    }
    Ok(())
}

/// Expand every unit against the filesystem.
///
/// The first error from any unit aborts the whole expansion.
pub fn expand(patterns: &[Pattern], root: &str) -> Result<Candidates> {
    let units = expansion_units(patterns);
    for unit in &units {
        check_root_containment(unit, root)?;
    }

    let expanded = units
        .par_iter()
        .map(|unit| expand_unit(unit).map(|files| (unit.index, files)))
        .collect::<Result<Vec<_>>>()?;

    Ok(expanded.into_iter().collect())
}

/// Expand the positive patterns of one unit, in pattern order.
pub fn expand_unit(unit: &ExpansionUnit<'_>) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for pattern in unit.patterns.iter().filter(|p| !p.negated) {
        let matched = expand_pattern(pattern)?;
        if matched.is_empty() {
            warn!("pattern {} ({:?}) matched no files", pattern.index, pattern.source);
            continue;
        }
        debug!(
            "pattern {} ({:?}) matched {} file(s)",
            pattern.index,
            pattern.source,
            matched.len()
        );
        files.extend(matched);
    }
    Ok(files)
}

/// Regular files matching one pattern, in file-name order per directory.
pub fn expand_pattern(pattern: &Pattern) -> Result<Vec<String>> {
    if !path::has_magic(&pattern.glob) {
        let literal = path::unescape(&pattern.glob);
        return Ok(if is_file(Path::new(&literal))? {
            vec![literal]
        } else {
            Vec::new()
        });
    }

    let base = path::literal_prefix(&pattern.glob);
    match std::fs::metadata(&base) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Ok(Vec::new()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return Ok(Vec::new())
        }
        Err(e) => return Err(Error::fs(&base, e)),
    }

    let mut walker = WalkDir::new(&base)
        .follow_links(false)
        .sort_by_file_name()
        .min_depth(1);
    if let Some(depth) = max_depth(&pattern.glob, &base) {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() && !is_file(entry.path())? {
            continue;
        }

        let candidate = path::path_to_posix(entry.path());
        if pattern.matches(&candidate) {
            trace!("pattern {} matched {}", pattern.index, candidate);
            files.push(candidate);
        }
    }

    Ok(files)
}

/// How deep below `base` a match can sit, or `None` when `**` allows any depth.
fn max_depth(glob: &str, base: &str) -> Option<usize> {
    if glob.contains("**") {
        return None;
    }
    let rest = path::relative_to(&path::escape(base), glob)?;
    Some(rest.split('/').count())
}

fn is_file(path: &Path) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(false),
        Err(e) => Err(Error::fs(path, e)),
    }
}
