use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Update mode
// ---------------------------------------------------------------------------

/// Baseline update policy for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Verify only: a differing baseline is a reported failure.
    None,
    /// Write baselines that are missing or not yet persisted; never touch
    /// a persisted one.
    #[default]
    New,
    /// Re-baseline everything: differing baselines are overwritten.
    All,
}

impl std::fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::New => write!(f, "new"),
            Self::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "new" => Ok(Self::New),
            "all" => Ok(Self::All),
            other => Err(format!("unknown update mode '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Per-element comparison record.
///
/// `want` is `None` when `received` is longer than the baseline; `diff` is
/// then `NaN`, which never satisfies `diff < tolerance` and so fails the
/// check.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElementDiff {
    pub want: Option<f64>,
    pub got: f64,
    pub diff: f64,
}

/// Result of comparing a received sequence against a baseline.
///
/// `diffs` is `None` when there was no baseline to compare against.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub pass: bool,
    pub diffs: Option<Vec<ElementDiff>>,
}

// ---------------------------------------------------------------------------
// Check outcome
// ---------------------------------------------------------------------------

/// How the update policy disposed of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Baseline written (created, or refreshed before first persist).
    Written,
    /// No baseline anywhere and verification mode: accepted as a
    /// first-run pass-through, nothing written.
    FirstRun,
    /// Baseline matched within tolerance.
    Matched,
    /// Persisted baseline differs, but mode `new` never rewrites a
    /// persisted entry; accepted as-is.
    AcceptedExisting,
    /// Baseline differs outside tolerance; reported as a failure.
    Mismatched,
}

/// Structured result of one snapshot check, returned to the caller.
///
/// `expected` and `actual` hold serialized sequence text, empty when not
/// applicable by convention. The diagnostic message is computed lazily via
/// [`CheckOutcome::message`].
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub pass: bool,
    pub ordinal: u32,
    pub key: String,
    pub verdict: Verdict,
    pub expected: String,
    pub actual: String,
    pub diffs: Option<Vec<ElementDiff>>,
    pub tolerance: f64,
}

impl CheckOutcome {
    /// Render the diagnostic message for this outcome.
    pub fn message(&self) -> String {
        match self.verdict {
            Verdict::Written => format!("snapshot '{}' written", self.key),
            Verdict::FirstRun => format!(
                "snapshot '{}' has no recorded baseline; accepted without writing (update mode: none)",
                self.key
            ),
            Verdict::Matched => format!(
                "snapshot '{}' matched within tolerance {}",
                self.key, self.tolerance
            ),
            Verdict::AcceptedExisting => format!(
                "snapshot '{}' differs from its persisted baseline; kept as-is (update mode: new)",
                self.key
            ),
            Verdict::Mismatched => self.mismatch_message(),
        }
    }

    fn mismatch_message(&self) -> String {
        let mut out = format!(
            "snapshot '{}' exceeded tolerance {}",
            self.key, self.tolerance
        );
        if let Some(diffs) = &self.diffs {
            for (idx, d) in diffs.iter().enumerate() {
                if d.diff < self.tolerance {
                    continue;
                }
                match d.want {
                    Some(want) => out.push_str(&format!(
                        "\n  [{idx}] want {want}, got {}, |diff| {}",
                        d.got, d.diff
                    )),
                    None => out.push_str(&format!(
                        "\n  [{idx}] want missing, got {}",
                        d.got
                    )),
                }
            }
        }
        if !self.expected.is_empty() {
            out.push_str("\nbaseline:\n");
            out.push_str(&self.expected);
        }
        if !self.actual.is_empty() {
            out.push_str("\nreceived:\n");
            out.push_str(&self.actual);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_mode_round_trip() {
        for (text, mode) in [
            ("none", UpdateMode::None),
            ("new", UpdateMode::New),
            ("all", UpdateMode::All),
        ] {
            assert_eq!(text.parse::<UpdateMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), text);
        }
        assert!("everything".parse::<UpdateMode>().is_err());
    }

    #[test]
    fn update_mode_default_is_new() {
        assert_eq!(UpdateMode::default(), UpdateMode::New);
    }

    #[test]
    fn mismatch_message_lists_failing_elements_only() {
        let outcome = CheckOutcome {
            pass: false,
            ordinal: 1,
            key: "adds numbers 1".into(),
            verdict: Verdict::Mismatched,
            expected: "[\n  1.0,\n  2.0\n]".into(),
            actual: "[\n  1.0,\n  9.0\n]".into(),
            diffs: Some(vec![
                ElementDiff { want: Some(1.0), got: 1.0, diff: 0.0 },
                ElementDiff { want: Some(2.0), got: 9.0, diff: 7.0 },
                ElementDiff { want: None, got: 3.0, diff: f64::NAN },
            ]),
            tolerance: 0.005,
        };
        let message = outcome.message();
        assert!(message.contains("adds numbers 1"));
        assert!(!message.contains("[0]"), "passing element should be omitted");
        assert!(message.contains("[1] want 2, got 9"));
        assert!(message.contains("[2] want missing, got 3"));
        assert!(message.contains("baseline:"));
        assert!(message.contains("received:"));
    }
}
