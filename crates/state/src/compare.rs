use crate::error::ParseError;
use crate::model::{ComparisonResult, ElementDiff};

/// Default maximum allowed absolute per-element difference.
pub const DEFAULT_TOLERANCE: f64 = 1e-2 / 2.0;

// ---------------------------------------------------------------------------
// Baseline text form
// ---------------------------------------------------------------------------

/// Parse baseline text into a numeric sequence.
///
/// This is the single explicit parse boundary: callers that want the
/// fail-soft policy (corrupt text treated as "no usable expectation") map
/// the error to an empty sequence themselves; see
/// [`crate::store::BaselineStore::load`].
pub fn parse_baseline(text: &str) -> Result<Vec<f64>, ParseError> {
    serde_json::from_str::<Vec<f64>>(text).map_err(|e| ParseError(e.to_string()))
}

/// Serialize a sequence into the baseline text form stored per key.
pub fn serialize_sequence(sequence: &[f64]) -> String {
    serde_json::to_string_pretty(sequence).expect("numeric sequences always serialize")
}

// ---------------------------------------------------------------------------
// Tolerant comparison
// ---------------------------------------------------------------------------

/// Compare `received` against `expected` element-wise within `tolerance`.
///
/// Absent `expected` cannot pass; the update policy decides whether that
/// is a first-write event. Iteration length is driven by `received`: a
/// missing `want` yields a `NaN` diff (fails), while trailing baseline
/// entries are never checked.
pub fn compare(expected: Option<&[f64]>, received: &[f64], tolerance: f64) -> ComparisonResult {
    let expected = match expected {
        Some(expected) => expected,
        None => {
            return ComparisonResult {
                pass: false,
                diffs: None,
            }
        }
    };

    let diffs: Vec<ElementDiff> = received
        .iter()
        .enumerate()
        .map(|(idx, &got)| {
            let want = expected.get(idx).copied();
            let diff = match want {
                Some(want) => (want - got).abs(),
                None => f64::NAN,
            };
            ElementDiff { want, got, diff }
        })
        .collect();

    // Strict inequality: a diff exactly equal to the tolerance fails, and
    // NaN never satisfies `<`.
    let pass = diffs.iter().all(|d| d.diff < tolerance);

    ComparisonResult {
        pass,
        diffs: Some(diffs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_array() {
        assert_eq!(parse_baseline("[1.0, 2.5, -3]").unwrap(), vec![1.0, 2.5, -3.0]);
        assert_eq!(parse_baseline("[]").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn parse_rejects_non_numeric_text() {
        assert!(parse_baseline("not json").is_err());
        assert!(parse_baseline("{\"a\": 1}").is_err());
        assert!(parse_baseline("[1, \"two\"]").is_err());
        assert!(parse_baseline("[1, null]").is_err());
    }

    #[test]
    fn serialized_form_round_trips() {
        let sequence = vec![1.0, 2.5, -3.0];
        let text = serialize_sequence(&sequence);
        assert_eq!(parse_baseline(&text).unwrap(), sequence);
    }

    #[test]
    fn absent_expected_never_passes() {
        let result = compare(None, &[1.0], DEFAULT_TOLERANCE);
        assert!(!result.pass);
        assert!(result.diffs.is_none());
    }

    #[test]
    fn within_tolerance_passes() {
        let result = compare(Some(&[1.0, 2.0]), &[1.001, 1.999], DEFAULT_TOLERANCE);
        assert!(result.pass);
    }

    #[test]
    fn diff_equal_to_tolerance_fails() {
        // 1.5 - 1.0 is exactly representable, so the diff equals the
        // tolerance and the strict inequality rejects it.
        let result = compare(Some(&[1.0]), &[1.5], 0.5);
        assert!(!result.pass);

        let result = compare(Some(&[1.0]), &[1.25], 0.5);
        assert!(result.pass);
    }

    #[test]
    fn received_longer_than_expected_fails() {
        let result = compare(Some(&[1.0]), &[1.0, 2.0], DEFAULT_TOLERANCE);
        assert!(!result.pass);
        let diffs = result.diffs.unwrap();
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[1].want, None);
        assert!(diffs[1].diff.is_nan());
    }

    #[test]
    fn received_shorter_than_expected_ignores_trailing_baseline() {
        // Asymmetric comparison: trailing baseline entries are unchecked.
        let result = compare(Some(&[1.0, 2.0, 3.0]), &[1.0], DEFAULT_TOLERANCE);
        assert!(result.pass);
        assert_eq!(result.diffs.unwrap().len(), 1);
    }

    #[test]
    fn empty_received_passes_against_any_baseline() {
        assert!(compare(Some(&[1.0, 2.0]), &[], DEFAULT_TOLERANCE).pass);
        assert!(compare(Some(&[]), &[], DEFAULT_TOLERANCE).pass);
    }
}
