use std::path::{Path, PathBuf};

use serde::Serialize;

use closesnap_snapfile::{read_snapshot_file, write_snapshot_file, SnapFileError};
use closesnap_state::{BaselineStore, CheckOutcome, RunContext, RunSummary, UpdateMode};

use crate::config::SessionConfig;

/// One test run against one snapshot file.
///
/// Owns the run context and the file path; supplies the durable-existence
/// signal on every check. All checks for a given snapshot file must go
/// through a single session on a single thread (parallel test processes
/// each get their own file).
pub struct SnapshotSession {
    path: PathBuf,
    ctx: RunContext,
}

impl SnapshotSession {
    /// Open a session over `path`, loading existing baselines.
    ///
    /// A missing file means the store starts empty. An unreadable or
    /// malformed file also starts empty, with a warning: the per-entry
    /// corrupt-text policy applied at file granularity, so a writing run
    /// can heal it.
    pub fn open(path: impl Into<PathBuf>, config: SessionConfig) -> Self {
        let path = path.into();
        let store = if path.exists() {
            match read_snapshot_file(&path) {
                Ok(entries) => BaselineStore::from_entries(entries),
                Err(err) => {
                    log::warn!(
                        "snapshot file {} unusable ({err}); starting from an empty store",
                        path.display()
                    );
                    BaselineStore::new()
                }
            }
        } else {
            BaselineStore::new()
        };

        Self {
            path,
            ctx: RunContext::with_store(config.update_mode, config.tolerance, store),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.ctx.mode()
    }

    /// Perform one snapshot check for `test_name`.
    pub fn check(&mut self, test_name: &str, received: &[f64]) -> CheckOutcome {
        let persisted = self.path.exists();
        self.ctx.check(test_name, received, persisted)
    }

    pub fn summary(&self) -> RunSummary {
        self.ctx.summary()
    }

    /// Keys whose test identity performed no check this run.
    pub fn obsolete_keys(&self) -> Vec<String> {
        self.ctx.store().obsolete_keys()
    }

    /// Flush pending writes to the snapshot file.
    ///
    /// Under mode `all`, obsolete entries are pruned first (re-baseline
    /// everything also retires snapshots of deleted tests). Returns
    /// whether a write happened; a clean store is left untouched.
    pub fn save(&mut self) -> Result<bool, SnapFileError> {
        if self.ctx.mode() == UpdateMode::All {
            for key in self.obsolete_keys() {
                self.ctx.store_mut().remove(&key);
            }
        }

        if !self.ctx.store().is_dirty() {
            return Ok(false);
        }

        write_snapshot_file(&self.path, self.ctx.store().entries())?;
        self.ctx.store_mut().mark_flushed();
        Ok(true)
    }

    /// End-of-run report for the external reporting collaborator.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            update_mode: self.ctx.mode(),
            tolerance: self.ctx.tolerance(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            summary: self.ctx.summary(),
            obsolete: self.obsolete_keys(),
        }
    }
}

/// Snapshot run report: the summary counters plus run metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub update_mode: UpdateMode,
    pub tolerance: f64,
    pub engine_version: String,
    pub run_at: String,
    pub summary: RunSummary,
    pub obsolete: Vec<String>,
}
