//! # Pattern Normalization
//!
//! Turns an ordered list of [`FileEntry`] values into an ordered list of
//! absolute [`Pattern`]s for one root directory.
//!
//! ## Rules
//!
//! - A bare string becomes one top-level pattern; its destination mirrors the
//!   root layout and it may never reach outside the root.
//! - An object with an array `src` becomes one pattern per element, in array
//!   order, at the position of the object, all sharing the object's `dest`.
//! - `dest` is trimmed and normalized; `""`, `"."` and `"./"` collapse to `""`.
//! - A wildcard `src` with a non-empty `dest` lacking a trailing `/` gets one
//!   appended, so globs always preserve structure below their literal prefix.
//! - Without a `dest`, a `src` inside the root keeps its layout from the
//!   root; one outside the root keeps it from its literal prefix.
//! - A literal `src` naming an existing directory is rewritten to
//!   `<dir>/**/*`. This is the one place normalization touches the disk.

use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::path;
use crate::pattern::Pattern;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// Normalize typed entries against `root`.
pub fn normalize(entries: &[FileEntry], root: impl AsRef<Path>) -> Result<Vec<Pattern>> {
    let root = absolute_posix(root.as_ref())?;
    normalize_in(entries, &root)
}

/// Validate untyped entries and normalize them against `root`.
pub fn normalize_values(values: &[Value], root: impl AsRef<Path>) -> Result<Vec<Pattern>> {
    let entries = FileEntry::from_values(values)?;
    normalize(&entries, root)
}

/// Normalize against an already absolute posix root.
pub(crate) fn normalize_in(entries: &[FileEntry], root: &str) -> Result<Vec<Pattern>> {
    let capacity = entries.iter().map(FileEntry::pattern_count).sum();
    let mut patterns = Vec::with_capacity(capacity);

    for (entry_index, entry) in entries.iter().enumerate() {
        match entry {
            FileEntry::Glob(src) => {
                let pattern = build(patterns.len(), entry_index, src, None, true, root)?;
                patterns.push(pattern);
            }
            FileEntry::SrcDest { src, dest } => {
                for glob in src.globs() {
                    let pattern =
                        build(patterns.len(), entry_index, glob, dest.as_deref(), false, root)?;
                    patterns.push(pattern);
                }
            }
        }
    }

    Ok(patterns)
}

/// Absolute, normalized posix form of a path, resolved against the current
/// directory when relative.
pub fn absolute_posix(root: &Path) -> Result<String> {
    let absolute = std::path::absolute(root).map_err(|e| Error::fs(root, e))?;
    Ok(path::normalize(&path::path_to_posix(&absolute)))
}

/// Normalize a `dest` value. Folder destinations keep one trailing `/`.
pub fn normalize_dest(dest: &str) -> String {
    let dest = path::to_posix(dest.trim());
    let folder = dest.ends_with('/');
    let normalized = path::normalize(&dest).trim_start_matches('/').to_string();
    if normalized.is_empty() {
        String::new()
    } else if folder {
        format!("{}/", normalized)
    } else {
        normalized
    }
}

fn build(
    index: usize,
    entry_index: usize,
    source: &str,
    dest: Option<&str>,
    top_level: bool,
    root: &str,
) -> Result<Pattern> {
    let negated = source.starts_with('!');
    let body = source.trim_start_matches('!').trim();
    if body.is_empty() {
        return Err(Error::Validation {
            index: entry_index,
            message: format!("pattern {:?} has an empty src", source),
        });
    }

    let mut glob = path::resolve(&path::escape(root), body);
    let mut magic = path::has_magic(body);
    let literal = path::unescape(&glob);

    if !magic && is_directory(&literal)? {
        glob = format!("{}/**/*", glob.trim_end_matches('/'));
        magic = true;
    }

    let mut dest = dest.map(normalize_dest).unwrap_or_default();
    if magic && !dest.is_empty() && !dest.ends_with('/') {
        dest.push('/');
    }
    let preserve_structure = dest.is_empty() || dest.ends_with('/');

    let reach = if magic {
        path::literal_prefix(&glob)
    } else {
        literal
    };
    let base = if top_level || (dest.is_empty() && path::is_within(root, &reach)) {
        root.to_string()
    } else {
        path::literal_prefix(&glob)
    };

    let matcher = path::compile(&glob).map_err(|source_err| Error::Glob {
        index: entry_index,
        pattern: source.to_string(),
        source: source_err,
    })?;

    Ok(Pattern {
        index,
        entry_index,
        source: source.to_string(),
        negated,
        glob,
        dest,
        preserve_structure,
        top_level,
        base,
        matcher,
    })
}

fn is_directory(literal: &str) -> Result<bool> {
    match std::fs::metadata(literal) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(false),
        Err(e) => Err(Error::fs(literal, e)),
    }
}
