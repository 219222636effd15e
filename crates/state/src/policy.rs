use crate::model::{UpdateMode, Verdict};

// ---------------------------------------------------------------------------
// Decision table
// ---------------------------------------------------------------------------

/// Which run counter a check increments. Exactly one per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Added,
    Updated,
    Matched,
    Unmatched,
}

/// Outcome of the update-policy table for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Overwrite the store entry with the received sequence.
    pub write: bool,
    pub tally: Tally,
    /// What the caller is told; may be `true` even when the comparison
    /// failed (acceptance paths).
    pub reported_pass: bool,
    pub verdict: Verdict,
}

/// The update-policy state machine as a pure decision table over
/// `(mode, has_baseline, persisted, pass)`.
///
/// `has_baseline` is whether the store holds an entry for the key;
/// `persisted` is whether the baseline file currently exists on durable
/// storage. The two differ when a baseline was created earlier in this run
/// but never flushed; verification mode treats that as unestablished.
pub fn decide(mode: UpdateMode, has_baseline: bool, persisted: bool, pass: bool) -> Decision {
    match mode {
        UpdateMode::None => match (has_baseline, pass) {
            // First-ever check: nothing to verify against, nothing written.
            (false, _) => Decision {
                write: false,
                tally: Tally::Added,
                reported_pass: true,
                verdict: Verdict::FirstRun,
            },
            (true, true) => matched(),
            (true, false) => Decision {
                write: false,
                tally: Tally::Unmatched,
                reported_pass: false,
                verdict: Verdict::Mismatched,
            },
        },
        UpdateMode::New => match (has_baseline, persisted) {
            // Missing entirely, or created this run and never flushed.
            (false, _) | (true, false) => written(Tally::Added),
            (true, true) => {
                if pass {
                    matched()
                } else {
                    // A persisted baseline is never rewritten in this mode;
                    // the differing result is accepted as-is.
                    Decision {
                        write: false,
                        tally: Tally::Matched,
                        reported_pass: true,
                        verdict: Verdict::AcceptedExisting,
                    }
                }
            }
        },
        UpdateMode::All => match (has_baseline, pass) {
            (false, _) => written(Tally::Added),
            (true, true) => matched(),
            (true, false) => written(Tally::Updated),
        },
    }
}

fn written(tally: Tally) -> Decision {
    Decision {
        write: true,
        tally,
        reported_pass: true,
        verdict: Verdict::Written,
    }
}

fn matched() -> Decision {
    Decision {
        write: false,
        tally: Tally::Matched,
        reported_pass: true,
        verdict: Verdict::Matched,
    }
}
