//! # Override Index
//!
//! A caller-owned, in-memory record of several independently resolved
//! rulesets, one *row* per ruleset. Rows are fixed at construction; their
//! contents change through explicit `set` / `delete` calls.
//!
//! Within a row, entries are keyed by the ASCII-lowercased destination and
//! also carry the lowercased source, so every lookup is case-insensitive
//! while the original spelling is kept and returned.
//!
//! Across rows, a higher row overrides a lower one: when two rows map the
//! same destination, only the highest row's entry is live.
//! [`OverrideIndex::get_all_dest_for_src`] answers which destinations a
//! changed source file must rewrite without re-running glob resolution.
//!
//! The index does no locking; share it behind whatever synchronization the
//! caller already uses.

use crate::error::{Error, Result};
use crate::fileset::ResolvedFile;
use crate::path;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One `src -> dest` mapping stored in a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub src: String,
    pub src_lower: String,
    pub dest: String,
    #[serde(skip)]
    seq: u64,
}

#[derive(Debug, Clone)]
struct Row<I> {
    identity: I,
    files: HashMap<String, IndexEntry>,
}

impl<I> Row<I> {
    /// Entries in insertion order.
    fn ordered(&self) -> Vec<&IndexEntry> {
        let mut entries: Vec<&IndexEntry> = self.files.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries
    }
}

/// Multi-row, case-insensitive src/dest index.
///
/// `I` is the identity token of a row, typically the ruleset it was resolved
/// from; [`OverrideIndex::validate`] compares tokens to detect a stale index.
#[derive(Debug, Clone)]
pub struct OverrideIndex<I> {
    rows: Vec<Row<I>>,
    next_seq: u64,
}

impl<I: PartialEq + fmt::Debug> OverrideIndex<I> {
    /// Create an index with one empty row per identity.
    pub fn new(identities: Vec<I>) -> Self {
        let rows = identities
            .into_iter()
            .map(|identity| Row {
                identity,
                files: HashMap::new(),
            })
            .collect();
        Self { rows, next_seq: 0 }
    }

    /// Create an index and seed rows with initial data.
    ///
    /// `data[i]` seeds row `i`; `None` or a missing element leaves the row
    /// empty. More data than identities is an error.
    pub fn with_data(identities: Vec<I>, data: Vec<Option<Vec<ResolvedFile>>>) -> Result<Self> {
        let mut index = Self::new(identities);
        if data.len() > index.rows.len() {
            return Err(Error::RowOutOfRange {
                row: data.len() - 1,
                rows: index.rows.len(),
            });
        }
        for (row, files) in data.into_iter().enumerate() {
            if let Some(files) = files {
                index.set_many(row, files)?;
            }
        }
        Ok(index)
    }

    /// Number of rows; fixed for the life of the index.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Identity token of a row.
    pub fn identity(&self, row: usize) -> Option<&I> {
        self.rows.get(row).map(|r| &r.identity)
    }

    /// Insert or replace the entry for `dest` in `row`.
    ///
    /// Replacing keeps the entry's original position in the row.
    pub fn set(&mut self, row: usize, src: &str, dest: &str) -> Result<()> {
        let rows = self.rows.len();
        let seq = self.next_seq;
        let target = self
            .rows
            .get_mut(row)
            .ok_or(Error::RowOutOfRange { row, rows })?;

        let key = path::key(dest);
        let seq = target.files.get(&key).map_or(seq, |existing| existing.seq);
        target.files.insert(
            key,
            IndexEntry {
                src: src.to_string(),
                src_lower: path::key(src),
                dest: dest.to_string(),
                seq,
            },
        );
        self.next_seq += 1;
        Ok(())
    }

    /// Insert or replace several entries in `row`, in order.
    pub fn set_many<T>(&mut self, row: usize, entries: T) -> Result<()>
    where
        T: IntoIterator<Item = ResolvedFile>,
    {
        if row >= self.rows.len() {
            return Err(Error::RowOutOfRange {
                row,
                rows: self.rows.len(),
            });
        }
        for entry in entries {
            self.set(row, &entry.src, &entry.dest)?;
        }
        Ok(())
    }

    pub fn has_by_src(&self, row: usize, src: &str) -> bool {
        self.get_by_src(row, src).is_some()
    }

    pub fn has_by_dest(&self, row: usize, dest: &str) -> bool {
        self.get_by_dest(row, dest).is_some()
    }

    /// First entry of `row` (in insertion order) whose source is `src`.
    ///
    /// This is a linear scan; rows hold one ruleset's output.
    pub fn get_by_src(&self, row: usize, src: &str) -> Option<&IndexEntry> {
        let key = path::key(src);
        self.rows
            .get(row)?
            .ordered()
            .into_iter()
            .find(|entry| entry.src_lower == key)
    }

    pub fn get_by_dest(&self, row: usize, dest: &str) -> Option<&IndexEntry> {
        self.rows.get(row)?.files.get(&path::key(dest))
    }

    /// Remove the entry [`OverrideIndex::get_by_src`] finds for `src`.
    ///
    /// Returns `false`, changing nothing, when there is none.
    pub fn delete_by_src(&mut self, row: usize, src: &str) -> bool {
        let Some(dest_key) = self.get_by_src(row, src).map(|entry| path::key(&entry.dest)) else {
            return false;
        };
        self.rows[row].files.remove(&dest_key).is_some()
    }

    /// Remove the entry of `row` for `dest`. Returns whether one existed.
    pub fn delete_by_dest(&mut self, row: usize, dest: &str) -> bool {
        self.rows
            .get_mut(row)
            .is_some_and(|target| target.files.remove(&path::key(dest)).is_some())
    }

    /// Check that `identities` match the rows' identities, index by index.
    pub fn validate(&self, identities: &[I]) -> Result<()> {
        let len = self.rows.len().max(identities.len());
        for index in 0..len {
            let stored = self.rows.get(index).map(|r| &r.identity);
            let given = identities.get(index);
            if stored != given {
                return Err(Error::IdentityMismatch {
                    index,
                    expected: describe(stored),
                    actual: describe(given),
                });
            }
        }
        Ok(())
    }

    /// Destinations currently owned by `src` across all rows.
    ///
    /// A destination is owned when the highest row holding any entry for it
    /// maps it from `src`. Destinations shadowed by another file in a higher
    /// row are left out. Order follows discovery: rows ascending, then
    /// insertion order within a row.
    pub fn get_all_dest_for_src(&self, src: &str) -> Vec<String> {
        let key = path::key(src);

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for row in &self.rows {
            for entry in row.ordered() {
                if entry.src_lower == key && seen.insert(path::key(&entry.dest)) {
                    candidates.push(path::key(&entry.dest));
                }
            }
        }

        candidates
            .into_iter()
            .filter_map(|dest_key| {
                let winner = self
                    .rows
                    .iter()
                    .rev()
                    .find_map(|row| row.files.get(&dest_key))?;
                (winner.src_lower == key).then(|| winner.dest.clone())
            })
            .collect()
    }

    /// Entries of `row` in insertion order.
    pub fn entries(&self, row: usize) -> Vec<&IndexEntry> {
        self.rows.get(row).map(Row::ordered).unwrap_or_default()
    }

    /// Number of entries in `row`.
    pub fn len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.files.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.files.is_empty())
    }

    /// Drop every entry of `row`, keeping the row and its identity.
    pub fn clear_row(&mut self, row: usize) -> Result<()> {
        let rows = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(Error::RowOutOfRange { row, rows })?;
        target.files.clear();
        Ok(())
    }

    /// The effective merged output: for each destination, the entry of the
    /// highest row holding it, with that row number.
    pub fn live_entries(&self) -> Vec<(usize, &IndexEntry)> {
        let mut owner: HashMap<&str, usize> = HashMap::new();
        for (row_number, row) in self.rows.iter().enumerate() {
            for key in row.files.keys() {
                owner.insert(key.as_str(), row_number);
            }
        }

        let mut live = Vec::new();
        for (row_number, row) in self.rows.iter().enumerate() {
            for (key, entry) in &row.files {
                if owner.get(key.as_str()) == Some(&row_number) {
                    live.push((row_number, entry));
                }
            }
        }
        live.sort_by_key(|(row_number, entry)| (*row_number, entry.seq));
        live
    }
}

fn describe<I: fmt::Debug>(identity: Option<&I>) -> String {
    identity.map_or_else(|| "<no row>".to_string(), |i| format!("{:?}", i))
}
