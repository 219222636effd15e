//! Snapshot file format.
//!
//! A snapshot file is a single pretty-printed JSON object mapping snapshot
//! keys to serialized sequence text:
//!
//! ```json
//! {
//!   "fir filter 1": "[\n  0.5,\n  0.25\n]",
//!   "fir filter 2": "[\n  0.125\n]"
//! }
//! ```
//!
//! The values are opaque here: whatever text the engine stored per key.
//! Parsing a value into numbers (and the corrupt-text fallback)
//! happens in `closesnap-state`, not in this crate.
//!
//! ## Design invariants
//!
//! - Keys are emitted in sorted order (`BTreeMap` iteration), so identical
//!   stores produce byte-identical files
//! - Output ends with exactly one trailing newline
//! - A missing file is the caller's "store starts empty", not an error;
//!   reading one that exists distinguishes `Io` from `Malformed`

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum SnapFileError {
    /// Filesystem error (read or write).
    Io(String),
    /// File contents are not a JSON object of string values.
    Malformed(String),
}

impl fmt::Display for SnapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "snapshot file IO error: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed snapshot file: {msg}"),
        }
    }
}

impl std::error::Error for SnapFileError {}

// ── Read / write ────────────────────────────────────────────────────

/// Read a snapshot file into its key→text entries.
///
/// The file must exist; callers treat absence as an empty store before
/// calling this.
pub fn read_snapshot_file(path: &Path) -> Result<BTreeMap<String, String>, SnapFileError> {
    let contents = fs::read_to_string(path).map_err(|e| SnapFileError::Io(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| SnapFileError::Malformed(e.to_string()))
}

/// Write entries to `path`, replacing any previous contents.
pub fn write_snapshot_file(
    path: &Path,
    entries: &BTreeMap<String, String>,
) -> Result<(), SnapFileError> {
    let mut contents = serde_json::to_string_pretty(entries)
        .map_err(|e| SnapFileError::Io(e.to_string()))?;
    contents.push('\n');
    fs::write(path, contents).map_err(|e| SnapFileError::Io(e.to_string()))
}
