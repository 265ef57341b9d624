//! # Fileset Resolver
//!
//! This library decides which files of a project tree go into a packaged
//! output and under which relative path, given ordered lists of inclusion
//! and exclusion glob patterns. It is used by the `fileset` command-line tool
//! but is designed to be embedded in any build or watch pipeline.
//!
//! ## Quick Example
//!
//! ```no_run
//! use fileset_resolver::entry::FileEntry;
//! use fileset_resolver::fileset;
//!
//! let entries = vec![
//!     FileEntry::from("source/**/*"),
//!     FileEntry::from("!source/debug.brs"),
//!     FileEntry::src_dest("../shared/images/**/*", Some("images")),
//! ];
//!
//! for file in fileset::resolve("/projects/app", &entries).unwrap() {
//!     println!("{} -> {}", file.src, file.dest);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Entries (`entry`)**: the two shapes a user writes: a bare glob
//!   (optionally `!`-negated) or a `{src, dest}` object.
//! - **Normalization (`normalize`)**: entries become absolute, ordered
//!   [`pattern::Pattern`]s for a given root.
//! - **Expansion (`glob_resolver`)**: patterns are expanded against the disk,
//!   in parallel, into candidate files.
//! - **Destinations (`destination`)**: a single file is evaluated against
//!   the whole pattern list; the last matching pattern wins.
//! - **File sets (`fileset`)**: the full pipeline for one ruleset, with
//!   case-insensitive destination collision handling.
//! - **Override index (`override_index`)**: several resolved rulesets kept
//!   side by side, answering which destinations a source currently owns.
//!
//! ## Pattern Syntax
//!
//! `*`, `**`, `?` and `[...]` classes (`[!...]` / `[^...]` negate) are
//! supported; `\[` and `\]` match literal brackets. A bare string resolves
//! relative to the root and mirrors the root layout. An object's `dest`:
//!
//! - omitted: keeps the layout from the root (from the glob's literal
//!   prefix when it lies outside the root);
//! - ending in `/`: keeps the layout below the literal prefix, under that
//!   folder;
//! - anything else: every match is written to exactly that path.

pub mod config;
pub mod defaults;
pub mod destination;
pub mod entry;
pub mod error;
pub mod fileset;
pub mod glob_resolver;
pub mod normalize;
pub mod output;
pub mod override_index;
pub mod path;
pub mod pattern;
pub mod suggestions;

pub use destination::{dest_for_patterns, get_dest_path};
pub use entry::FileEntry;
pub use error::{Error, Result};
pub use fileset::{resolve, resolve_layers, ResolvedFile, Ruleset};
pub use normalize::{normalize, normalize_values};
pub use override_index::{IndexEntry, OverrideIndex};

#[cfg(test)]
mod dest_proptest;
