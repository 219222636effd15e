use std::collections::{BTreeMap, HashSet};

use crate::compare::parse_baseline;
use crate::key::test_name_of_key;

/// In-memory baseline store for one run.
///
/// Maps snapshot keys to serialized sequence text. Entries are only ever
/// overwritten whole, never merged. Sorted iteration keeps file writes
/// deterministic. The store also tracks which test identities were checked
/// this run, for the obsolete-entry sweep.
#[derive(Debug, Default)]
pub struct BaselineStore {
    entries: BTreeMap<String, String>,
    checked_tests: HashSet<String>,
    dirty: bool,
}

impl BaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from previously persisted entries.
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            checked_tests: HashSet::new(),
            dirty: false,
        }
    }

    /// Load the baseline sequence for `key`.
    ///
    /// Returns `None` when the key is absent. Text that fails to parse is
    /// mapped to an empty sequence here, the one place where corrupt
    /// baseline data is downgraded to "no usable expectation".
    pub fn load(&self, key: &str) -> Option<Vec<f64>> {
        let text = self.entries.get(key)?;
        Some(parse_baseline(text).unwrap_or_default())
    }

    /// Overwrite the entry for `key` with freshly serialized text.
    pub fn insert(&mut self, key: String, serialized: String) {
        self.entries.insert(key, serialized);
        self.dirty = true;
    }

    /// Drop the entry for `key` (obsolete-entry pruning).
    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
    }

    /// Record that `test_name` performed a check this run.
    pub fn mark_checked(&mut self, test_name: &str) {
        self.checked_tests.insert(test_name.to_string());
    }

    /// Keys whose test identity performed no check this run. Keys that do
    /// not follow the addressing convention can never be checked and are
    /// reported as obsolete too.
    pub fn obsolete_keys(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| {
                test_name_of_key(key)
                    .map_or(true, |name| !self.checked_tests.contains(name))
            })
            .cloned()
            .collect()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Whether the store has unflushed writes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after the entries reached durable storage.
    pub fn mark_flushed(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
