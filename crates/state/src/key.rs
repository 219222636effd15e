use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Invocation counter
// ---------------------------------------------------------------------------

/// Per-test invocation counts for the current run.
///
/// Entries are created lazily and pre-incremented: the first check for a
/// test identity is ordinal 1. Counts reset only by starting a new run.
#[derive(Debug, Default)]
pub struct InvocationCounter {
    counts: HashMap<String, u32>,
}

impl InvocationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `test_name` and return the new ordinal.
    pub fn next(&mut self, test_name: &str) -> u32 {
        let count = self.counts.entry(test_name.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

/// Derive the lookup key for the `ordinal`-th check of `test_name`.
///
/// The format is the baseline file's addressing convention; baselines
/// written by a prior run are located by re-deriving the same key.
pub fn snapshot_key(test_name: &str, ordinal: u32) -> String {
    format!("{test_name} {ordinal}")
}

/// Recover the test identity a key belongs to, or `None` when the key does
/// not follow the `"{test_name} {ordinal}"` convention.
pub fn test_name_of_key(key: &str) -> Option<&str> {
    let (name, ordinal) = key.rsplit_once(' ')?;
    if name.is_empty() || ordinal.parse::<u32>().map_or(true, |n| n == 0) {
        return None;
    }
    Some(name)
}
