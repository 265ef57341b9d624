//! Normalized patterns.

use crate::path;

/// One normalized, absolute pattern.
///
/// Patterns are produced by [`crate::normalize`] in declaration order and
/// never reordered afterwards; `index` is the position in that list.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Position in the normalized pattern list.
    pub index: usize,
    /// Position of the raw entry this pattern came from.
    pub entry_index: usize,
    /// The `src` as written, including any leading `!`.
    pub source: String,
    /// Whether the pattern excludes what it matches.
    pub negated: bool,
    /// Absolute, posix-separated glob without the `!`.
    pub glob: String,
    /// Destination template: `""`, a folder ending in `/`, or a literal file path.
    pub dest: String,
    /// `true` when matches keep their layout below `base`; `false` when they
    /// all collapse onto `dest`.
    pub preserve_structure: bool,
    /// Whether this came from a bare string entry.
    pub top_level: bool,
    /// Absolute directory whose layout is preserved under `dest`.
    pub base: String,
    pub(crate) matcher: glob::Pattern,
}

impl Pattern {
    /// Whether an absolute posix path matches this pattern's glob.
    pub fn matches(&self, path: &str) -> bool {
        path::glob_match(&self.matcher, path)
    }

    /// Destination of a path already known to match this (positive) pattern.
    pub fn destination_for(&self, path: &str) -> String {
        if !self.preserve_structure {
            return self.dest.clone();
        }

        let relative = match path::relative_to(&self.base, path) {
            Some(relative) => relative,
            None => path.rsplit('/').next().unwrap_or(path),
        };
        let joined = if self.dest.is_empty() {
            relative.to_string()
        } else {
            format!("{}{}", self.dest, relative)
        };
        path::normalize(&joined).trim_start_matches('/').to_string()
    }
}
