//! Gradient-norm convergence test.
//!
//! [`test_gradient`] is the stand-alone form of the stopping rule L-BFGS
//! applies internally: a point counts as converged once `‖g‖₂ < tol`. The
//! self-check applies it to the re-evaluated final gradient, so the reported
//! status does not depend on which rule made the solver stop.
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        Grad,
        validation::{validate_grad, verify_tol_grad},
    },
};

/// Result of [`test_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientTest {
    /// `‖g‖₂ ≥ tol`: keep iterating.
    Continue,
    /// `‖g‖₂ < tol`.
    Converged,
}

impl std::fmt::Display for GradientTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradientTest::Continue => write!(f, "continue"),
            GradientTest::Converged => write!(f, "converged"),
        }
    }
}

/// Compare the Euclidean norm of `grad` against `tol`.
///
/// # Errors
/// - [`OptError::InvalidTolGrad`] if `tol` is non-finite or ≤ 0.
/// - [`OptError::InvalidGradient`] if any gradient entry is non-finite.
pub fn test_gradient(grad: &Grad, tol: f64) -> OptResult<GradientTest> {
    verify_tol_grad(Some(tol))?;
    validate_grad(grad, grad.len())?;
    if grad.l2_norm() < tol { Ok(GradientTest::Converged) } else { Ok(GradientTest::Continue) }
}
