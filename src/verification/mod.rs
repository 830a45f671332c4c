//! verification — closed-form and end-to-end self-check of the unigram fit.
//!
//! Purpose
//! -------
//! Decide whether the evaluators and the optimizer agree with hand-derived
//! values, and say so line by line. [`run_selfcheck`] drives the
//! [`Harness`] state machine over the fixture model and returns a [`Report`]
//! whose [`Report::exit_code`] the binary hands to the OS.
//!
//! Key behaviors
//! -------------
//! - [`config`]: validated [`HarnessConfig`] (test point, tolerances, start
//!   point, solver options).
//! - [`harness`]: the INIT → … → REPORT stages.
//! - [`report`]: `(GOOD|BAD) <desc> = <value>, should be <expected>
//!   (tolerance <eps>)` lines and the overall verdict.
//! - [`errors`]: [`SelfCheckError`] for runs that cannot produce a report.
//!
//! Testing notes
//! -------------
//! - Unit tests per submodule; `tests/integration_selfcheck.rs` runs the
//!   public surface end to end.

pub mod config;
pub mod errors;
pub mod harness;
pub mod report;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::config::HarnessConfig;
pub use self::errors::{SelfCheckError, SelfCheckResult};
pub use self::harness::{Harness, Stage, run_selfcheck};
pub use self::report::{Check, Report};
