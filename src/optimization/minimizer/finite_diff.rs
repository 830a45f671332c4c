//! minimizer::finite_diff — finite-difference gradients for any [`Objective`].
//!
//! Purpose
//! -------
//! Approximate `∇f(θ)` numerically so the analytic gradient of an objective
//! can be checked against an independent estimate, without callers touching
//! the `finitediff` API directly.
//!
//! Key behaviors
//! -------------
//! - [`central_gradient`] evaluates a central-difference gradient and falls
//!   back to forward differences when the central result fails validation.
//! - Objective errors raised inside the difference closure are captured in a
//!   `RefCell` side channel and surfaced as [`OptError`] after the sweep.
//!
//! Invariants & assumptions
//! ------------------------
//! - Gradients returned from this module always satisfy [`validate_grad`]
//!   for `theta.len()`.
//! - A captured objective error is a hard failure; no fallback is attempted.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use crate::optimization::{
    errors::OptResult,
    minimizer::{Grad, Theta, traits::Objective, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Central-difference gradient of `f` at `theta`.
///
/// Errors
/// ------
/// - Any error the objective raised while being evaluated, converted through
///   `From<Error> for OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` when
///   neither the central nor the forward estimate is valid.
pub fn central_gradient<F: Objective>(f: &F, theta: &Theta, data: &F::Data) -> OptResult<Grad> {
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let func = |x: &Theta| match f.value(x, data) {
        Ok(v) => v,
        Err(e) => {
            closure_err.replace(Some(e.into()));
            f64::NAN
        }
    };

    let cent_grad = theta.central_diff(&func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    match validate_grad(&cent_grad, theta.len()) {
        Ok(()) => Ok(cent_grad),
        Err(_) => run_fd_diff(theta, &func, &closure_err),
    }
}

/// Forward-difference gradient with error capture and validation.
///
/// Clears `closure_err` on entry; `func` is expected to store any failure
/// there and return `NaN`.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use crate::optimization::minimizer::Cost;
    use approx::assert_abs_diff_eq;
    use argmin::core::ArgminError;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Central-difference gradients for a smooth objective.
    // - Propagation of objective errors through the closure side channel.
    // - Validation of non-finite forward-difference gradients.
    //
    // They intentionally DO NOT cover:
    // - The unigram objective itself (checked in the harness and its tests).
    // -------------------------------------------------------------------------

    // f(θ) = Σ θᵢ², failing when θ₀ > 10.
    struct Quadratic;

    impl Objective for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            if theta[0] > 10.0 {
                return Err(OptError::InvalidThetaInput { index: 0, value: theta[0] });
            }
            Ok(theta.dot(theta))
        }

        fn gradient(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(theta.mapv(|x| 2.0 * x))
        }

        fn check(&self, _theta: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `central_gradient` reproduces the analytic gradient of a
    // quadratic.
    //
    // Given
    // -----
    // - f(θ) = θᵀθ at θ = (1, -2).
    //
    // Expect
    // ------
    // - The estimate is within 1e-6 of (2, -4).
    fn central_gradient_matches_quadratic_gradient() {
        // Arrange
        let theta = array![1.0, -2.0];

        // Act
        let grad = central_gradient(&Quadratic, &theta, &()).expect("quadratic is smooth");

        // Assert
        assert_abs_diff_eq!(grad, array![2.0, -4.0], epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an error raised by the objective during differencing is returned
    // instead of a NaN-filled gradient.
    //
    // Given
    // -----
    // - θ₀ = 11, outside the objective's accepted range.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidThetaInput { .. })`.
    fn central_gradient_propagates_objective_error() {
        // Arrange
        let theta = array![11.0, 0.0];

        // Act
        let result = central_gradient(&Quadratic, &theta, &());

        // Assert
        match result {
            Err(OptError::InvalidThetaInput { index: 0, .. }) => {}
            other => panic!("Expected InvalidThetaInput, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `run_fd_diff` forwards an error stored in `closure_err`.
    //
    // Given
    // -----
    // - A closure that writes an `ArgminError` into the cell and returns NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::NotImplemented { .. })`.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            closure_err.replace(Some(ArgminError::NotImplemented { text: "fd".into() }.into()));
            f64::NAN
        };

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        match result {
            Err(OptError::NotImplemented { .. }) => {}
            other => panic!("Expected NotImplemented, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that a NaN-valued objective yields `InvalidGradient`.
    fn run_fd_diff_non_finite_gradient_is_rejected() {
        // Arrange
        let theta: Theta = array![0.0, 1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| f64::NAN;

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        assert!(matches!(result, Err(OptError::InvalidGradient { .. })));
    }
}
