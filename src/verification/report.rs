//! Pass/fail lines produced by the self-check.
//!
//! Every comparison becomes a [`Check`], rendered as
//!
//! ```text
//! (GOOD) <description> = <value>, should be <expected> (tolerance <eps>)
//! ```
//!
//! with `BAD` in place of `GOOD` on failure. A [`Report`] collects the checks
//! in the order they ran and closes with one overall line.
use std::fmt;

use log::debug;
use ndarray::ArrayView1;

use crate::optimization::minimizer::OptimOutcome;

/// One comparison and its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub description: String,
    pub value: String,
    pub expected: String,
    pub tolerance: f64,
    pub passed: bool,
}

impl Check {
    /// `|value - expected| < tolerance`. NaN never passes.
    pub fn scalar(description: impl Into<String>, value: f64, expected: f64, tolerance: f64) -> Self {
        Self {
            description: description.into(),
            value: format!("{value:.6}"),
            expected: format!("{expected:.6}"),
            tolerance,
            passed: within(value, expected, tolerance),
        }
    }

    /// Elementwise [`Check::scalar`] over two vectors, reported on one line.
    /// Vectors of different lengths fail.
    pub fn vector(
        description: impl Into<String>, value: ArrayView1<f64>, expected: ArrayView1<f64>,
        tolerance: f64,
    ) -> Self {
        let passed = value.len() == expected.len()
            && value.iter().zip(expected.iter()).all(|(&v, &e)| within(v, e, tolerance));
        Self {
            description: description.into(),
            value: fmt_point(value),
            expected: fmt_point(expected),
            tolerance,
            passed,
        }
    }

    /// A check whose verdict was decided by the caller.
    pub fn status(
        description: impl Into<String>, value: impl fmt::Display, expected: impl fmt::Display,
        tolerance: f64, passed: bool,
    ) -> Self {
        Self {
            description: description.into(),
            value: value.to_string(),
            expected: expected.to_string(),
            tolerance,
            passed,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) {} = {}, should be {} (tolerance {:e})",
            verdict(self.passed),
            self.description,
            self.value,
            self.expected,
            self.tolerance
        )
    }
}

/// Ordered checks plus the optimizer outcome they were derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    checks: Vec<Check>,
    outcome: Option<OptimOutcome>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, check: Check) {
        debug!("{check}");
        self.checks.push(check);
    }

    pub(crate) fn set_outcome(&mut self, outcome: OptimOutcome) {
        self.outcome = Some(outcome);
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// The optimizer run, once the harness has reached it.
    pub fn outcome(&self) -> Option<&OptimOutcome> {
        self.outcome.as_ref()
    }

    /// `true` iff at least one check ran and every check passed.
    pub fn all_passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Closing line stating whether every check agreed.
    pub fn summary_line(&self) -> String {
        if self.all_passed() {
            format!("({}) Ending status agrees with optimization result", verdict(true))
        } else {
            format!("({}) Ending status does not agree with optimization result", verdict(false))
        }
    }

    /// Process exit code: 0 when every check passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            writeln!(f, "{check}")?;
        }
        write!(f, "{}", self.summary_line())
    }
}

/// `(a, b, …)` with six decimals per entry.
pub fn fmt_point(point: ArrayView1<f64>) -> String {
    let entries: Vec<String> = point.iter().map(|v| format!("{v:.6}")).collect();
    format!("({})", entries.join(", "))
}

fn within(value: f64, expected: f64, tolerance: f64) -> bool {
    (value - expected).abs() < tolerance
}

fn verdict(passed: bool) -> &'static str {
    if passed { "GOOD" } else { "BAD" }
}
