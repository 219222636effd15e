use crate::compare::{compare, serialize_sequence, DEFAULT_TOLERANCE};
use crate::key::{snapshot_key, InvocationCounter};
use crate::model::{CheckOutcome, UpdateMode, Verdict};
use crate::policy::decide;
use crate::store::BaselineStore;
use crate::summary::RunSummary;

/// Explicit run state threaded through every check: invocation counter,
/// baseline store, and run summary, plus the mode and tolerance fixed for
/// the run.
///
/// All checks against one store must go through one `RunContext` on one
/// thread; mutation takes `&mut self`, so the single-writer assumption is
/// enforced by the borrow rather than by convention.
#[derive(Debug)]
pub struct RunContext {
    mode: UpdateMode,
    tolerance: f64,
    counter: InvocationCounter,
    store: BaselineStore,
    summary: RunSummary,
}

impl RunContext {
    /// Fresh context with an empty store and the default tolerance.
    pub fn new(mode: UpdateMode) -> Self {
        Self::with_store(mode, DEFAULT_TOLERANCE, BaselineStore::new())
    }

    /// Context over a pre-seeded store (e.g. loaded from a snapshot file).
    pub fn with_store(mode: UpdateMode, tolerance: f64, store: BaselineStore) -> Self {
        Self {
            mode,
            tolerance,
            counter: InvocationCounter::new(),
            store,
            summary: RunSummary::default(),
        }
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn store(&self) -> &BaselineStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BaselineStore {
        &mut self.store
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Give up the store, e.g. to carry baselines into a later run.
    pub fn into_store(self) -> BaselineStore {
        self.store
    }

    /// Perform one snapshot check.
    ///
    /// `persisted` is the durable-existence signal from the file
    /// collaborator: whether the baseline file currently exists on disk,
    /// independent of in-memory entries.
    pub fn check(&mut self, test_name: &str, received: &[f64], persisted: bool) -> CheckOutcome {
        let ordinal = self.counter.next(test_name);
        let key = snapshot_key(test_name, ordinal);
        self.store.mark_checked(test_name);

        let baseline = self.store.load(&key);
        let has_baseline = baseline.is_some();
        let comparison = compare(baseline.as_deref(), received, self.tolerance);
        let decision = decide(self.mode, has_baseline, persisted, comparison.pass);

        let received_serialized = serialize_sequence(received);
        if decision.write {
            self.store.insert(key.clone(), received_serialized.clone());
        }
        self.summary.record(decision.tally);

        let (expected, actual) = match decision.verdict {
            Verdict::Written => (String::new(), String::new()),
            Verdict::FirstRun | Verdict::Matched => (String::new(), received_serialized),
            Verdict::AcceptedExisting | Verdict::Mismatched => (
                baseline.as_deref().map(serialize_sequence).unwrap_or_default(),
                received_serialized,
            ),
        };

        CheckOutcome {
            pass: decision.reported_pass,
            ordinal,
            key,
            verdict: decision.verdict,
            expected,
            actual,
            diffs: comparison.diffs,
            tolerance: self.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_in_new_mode_writes_and_counts_added() {
        let mut ctx = RunContext::new(UpdateMode::New);
        let outcome = ctx.check("adds", &[1.0, 2.0], false);

        assert!(outcome.pass);
        assert_eq!(outcome.ordinal, 1);
        assert_eq!(outcome.key, "adds 1");
        assert_eq!(outcome.verdict, Verdict::Written);
        assert_eq!(outcome.expected, "");
        assert_eq!(outcome.actual, "");
        assert_eq!(ctx.summary().added, 1);
        assert!(ctx.store().is_dirty());
        assert_eq!(ctx.store().load("adds 1"), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn repeated_checks_get_distinct_keys() {
        let mut ctx = RunContext::new(UpdateMode::New);
        let first = ctx.check("adds", &[1.0], false);
        let second = ctx.check("adds", &[2.0], false);

        assert_eq!(first.key, "adds 1");
        assert_eq!(second.key, "adds 2");
        assert_eq!(ctx.store().len(), 2);
    }

    #[test]
    fn mark_checked_happens_even_on_failure() {
        let mut store = BaselineStore::new();
        store.insert("adds 1".into(), "[1.0]".into());
        store.mark_flushed();
        let mut ctx = RunContext::with_store(UpdateMode::None, DEFAULT_TOLERANCE, store);

        let outcome = ctx.check("adds", &[9.0], true);
        assert!(!outcome.pass);
        assert!(ctx.store().obsolete_keys().is_empty());
    }

    #[test]
    fn failure_payload_carries_both_sequences() {
        let mut store = BaselineStore::new();
        store.insert("adds 1".into(), "[1.0]".into());
        store.mark_flushed();
        let mut ctx = RunContext::with_store(UpdateMode::None, DEFAULT_TOLERANCE, store);

        let outcome = ctx.check("adds", &[9.0], true);
        assert_eq!(outcome.verdict, Verdict::Mismatched);
        assert_eq!(outcome.expected, serialize_sequence(&[1.0]));
        assert_eq!(outcome.actual, serialize_sequence(&[9.0]));
        assert_eq!(ctx.summary().unmatched, 1);
    }

    #[test]
    fn corrupt_baseline_compares_as_empty_expectation() {
        let mut store = BaselineStore::new();
        store.insert("adds 1".into(), "corrupt".into());
        store.mark_flushed();
        let mut ctx = RunContext::with_store(UpdateMode::None, DEFAULT_TOLERANCE, store);

        // Non-empty received against the empty fallback fails.
        let outcome = ctx.check("adds", &[1.0], true);
        assert!(!outcome.pass);
        assert_eq!(outcome.verdict, Verdict::Mismatched);
        assert_eq!(outcome.expected, "[]");
    }

    #[test]
    fn in_memory_baseline_not_yet_flushed_counts_as_unestablished_for_new_mode() {
        let mut ctx = RunContext::new(UpdateMode::New);
        ctx.store_mut().insert("adds 1".into(), "[1.0]".into());

        // File does not exist yet: mode `new` refreshes the entry.
        let outcome = ctx.check("adds", &[5.0], false);
        assert!(outcome.pass);
        assert_eq!(outcome.verdict, Verdict::Written);
        assert_eq!(ctx.store().load("adds 1"), Some(vec![5.0]));
        assert_eq!(ctx.summary().added, 1);
    }
}
