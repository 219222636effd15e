//! `closesnap-snapfile` — the on-disk snapshot file collaborator.
//!
//! Owns the physical key→text mapping; what the text means is the engine's
//! business (`closesnap-state`).

pub mod format;

pub use format::{read_snapshot_file, write_snapshot_file, SnapFileError};
