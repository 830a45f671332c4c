//! Validated configuration for the self-check harness.
use ndarray::{Array1, ArrayView1, array};

use crate::optimization::minimizer::SolveOptions;
use crate::verification::errors::{SelfCheckError, SelfCheckResult};

/// Where the closed-form check evaluates the objective.
pub const DEFAULT_TEST_POINT: [f64; 2] = [3.2, -2.0];

/// Absolute tolerance for every numeric comparison in the report.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Gradient-norm threshold below which the fitted point is accepted.
pub const DEFAULT_GRAD_TOLERANCE: f64 = 1e-3;

/// Self-check configuration.
///
/// Fields
/// ------
/// - `test_point`: weights at which partition, NLL and gradient are compared
///   with their closed forms and with finite differences.
/// - `tolerance`: absolute tolerance for those comparisons and for the final
///   point.
/// - `grad_tolerance`: acceptance threshold for the final gradient norm,
///   reported as the optimization status line.
/// - `start`: optimizer start point.
/// - `solve`: optimizer options. Its `tols.tol_grad` is the solver's own
///   stopping rule and is usually tighter than `grad_tolerance`.
///
/// Default
/// -------
/// `(3.2, -2.0)`, `1e-6`, `1e-3`, `(0, 0)`, [`SolveOptions::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub test_point: Array1<f64>,
    pub tolerance: f64,
    pub grad_tolerance: f64,
    pub start: Array1<f64>,
    pub solve: SolveOptions,
}

impl HarnessConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    /// - [`SelfCheckError::InvalidTolerance`] for a non-finite or non-positive
    ///   tolerance.
    /// - [`SelfCheckError::EmptyPoint`] / [`SelfCheckError::NonFinitePoint`]
    ///   for a bad test or start point.
    /// - [`SelfCheckError::PointLengthMismatch`] when the two points differ in
    ///   length.
    pub fn new(
        test_point: Array1<f64>, tolerance: f64, grad_tolerance: f64, start: Array1<f64>,
        solve: SolveOptions,
    ) -> SelfCheckResult<Self> {
        let config = Self { test_point, tolerance, grad_tolerance, start, solve };
        config.validate()?;
        Ok(config)
    }

    /// Re-check every rule of [`HarnessConfig::new`].
    ///
    /// The fields are public, so a config built by struct literal or edited
    /// after construction goes through this before a run.
    pub fn validate(&self) -> SelfCheckResult<()> {
        verify_tolerance("comparison tolerance", self.tolerance)?;
        verify_tolerance("gradient tolerance", self.grad_tolerance)?;
        verify_point("test point", self.test_point.view())?;
        verify_point("start point", self.start.view())?;
        if self.start.len() != self.test_point.len() {
            return Err(SelfCheckError::PointLengthMismatch {
                name: "start point",
                expected: self.test_point.len(),
                actual: self.start.len(),
            });
        }
        Ok(())
    }

    /// Whether optimizer progress is streamed (requires `obs_slog`).
    pub fn verbose(&self) -> bool {
        self.solve.verbose
    }

    /// Check that both points carry one weight per outcome.
    pub(crate) fn verify_dim(&self, dim: usize) -> SelfCheckResult<()> {
        for (name, len) in [("test point", self.test_point.len()), ("start point", self.start.len())]
        {
            if len != dim {
                return Err(SelfCheckError::PointLengthMismatch { name, expected: dim, actual: len });
            }
        }
        Ok(())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            test_point: array![DEFAULT_TEST_POINT[0], DEFAULT_TEST_POINT[1]],
            tolerance: DEFAULT_TOLERANCE,
            grad_tolerance: DEFAULT_GRAD_TOLERANCE,
            start: Array1::zeros(2),
            solve: SolveOptions::default(),
        }
    }
}

fn verify_tolerance(name: &'static str, value: f64) -> SelfCheckResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SelfCheckError::InvalidTolerance { name, value });
    }
    Ok(())
}

fn verify_point(name: &'static str, point: ArrayView1<f64>) -> SelfCheckResult<()> {
    if point.is_empty() {
        return Err(SelfCheckError::EmptyPoint { name });
    }
    if let Some((index, &value)) = point.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SelfCheckError::NonFinitePoint { name, index, value });
    }
    Ok(())
}
