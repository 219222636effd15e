//! `closesnap-harness` — session facade for tolerant numeric snapshot tests.
//!
//! Wires configuration, the snapshot file, and the lifecycle engine into
//! the surface test code calls:
//!
//! ```no_run
//! use closesnap_harness::{assert_close_snapshot, SessionConfig, SnapshotSession};
//!
//! let mut session = SnapshotSession::open("pipeline.snap", SessionConfig::from_env());
//! let output = vec![0.5, 0.25, 0.125];
//! assert_close_snapshot!(session, "fir filter", &output);
//! session.save().unwrap();
//! ```

pub mod config;
pub mod session;

pub use closesnap_state::{CheckOutcome, RunSummary, UpdateMode, Verdict, DEFAULT_TOLERANCE};
pub use config::{ConfigError, SessionConfig};
pub use session::{SessionReport, SnapshotSession};

/// Check `received` against its recorded baseline, panicking with the
/// diagnostic message when the check fails. Evaluates to the
/// [`CheckOutcome`] on success.
#[macro_export]
macro_rules! assert_close_snapshot {
    ($session:expr, $test_name:expr, $received:expr $(,)?) => {{
        let outcome = $session.check($test_name, $received);
        if !outcome.pass {
            panic!("{}", outcome.message());
        }
        outcome
    }};
}
