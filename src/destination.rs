//! # Destination Resolution
//!
//! Decides, for a single file, whether it belongs to a ruleset's output and
//! under which relative path. This is the single source of truth for that
//! question; [`crate::fileset`] only calls it for each candidate.
//!
//! Evaluation walks the *whole* pattern list, not just the pattern that
//! discovered the file, and the last matching pattern wins:
//!
//! - a negated match clears any inclusion made by earlier patterns;
//! - a positive match includes the file and recomputes its destination.

use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::normalize::{absolute_posix, normalize_in};
use crate::path;
use crate::pattern::Pattern;
use std::path::Path;

/// Destination of `file` under `entries` rooted at `root`, or `None` when
/// the file is not selected.
///
/// Relative `file` and `root` values resolve against the current directory.
pub fn get_dest_path(
    file: impl AsRef<Path>,
    entries: &[FileEntry],
    root: impl AsRef<Path>,
) -> Result<Option<String>> {
    let root = absolute_posix(root.as_ref())?;
    let file = absolute_posix(file.as_ref())?;
    let patterns = normalize_in(entries, &root)?;
    dest_for_patterns(&file, &patterns, &root)
}

/// Destination of an absolute posix `file` under already normalized patterns.
pub fn dest_for_patterns(file: &str, patterns: &[Pattern], root: &str) -> Result<Option<String>> {
    let file = path::normalize(file);
    let mut dest = None;

    for pattern in patterns {
        if !pattern.matches(&file) {
            continue;
        }
        if pattern.negated {
            dest = None;
            continue;
        }
        if pattern.top_level && !path::is_within(root, &file) {
            return Err(Error::OutOfRoot {
                index: pattern.index,
                pattern: pattern.source.clone(),
                path: file,
            });
        }
        dest = Some(pattern.destination_for(&file));
    }

    Ok(dest)
}
