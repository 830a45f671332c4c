//! Negative log-likelihood objective for the softmax unigram model.
//!
//! For log-weights `w` (length `n`) and counts `c` with total `N`:
//!
//! - partition:  `Z(w) = Σ_i exp(w_i)`
//! - objective:  `f(w) = −Σ_i c_i · (w_i − ln Z(w))`
//! - gradient:   `∂f/∂w_i = −(c_i − N · p_i)`, `p = softmax(w)`
//!
//! The free functions are pure: they read the weights and the model and
//! write nothing but their return value (or the caller's gradient buffer).
//! [`UnigramObjective`] bundles them behind the optimizer's [`Objective`]
//! trait so the argmin adapter can drive them.
//!
//! Evaluations are traced at `trace` level through the `log` facade. Tracing
//! is off unless a logger enables that level and never alters a result.
use log::trace;
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

use crate::{
    optimization::{
        errors::OptResult,
        minimizer::{Cost, Grad, Objective, Theta},
        numerical_stability::{log_sum_exp, softmax_into},
    },
    unigram::{
        errors::{MaxEntError, MaxEntResult},
        model::UnigramModel,
    },
};

/// Softmax normalizer `Z(w) = Σ_i exp(w_i)`.
///
/// Recomputed in full on every call. Scaling: `Z(w + c·1) = e^c · Z(w)`.
pub fn partition(weights: ArrayView1<f64>) -> f64 {
    weights.iter().map(|&w| w.exp()).sum()
}

/// Category probabilities `p_i = exp(w_i) / Z(w)`.
///
/// Invariant under adding the same constant to every weight.
pub fn probabilities(weights: ArrayView1<f64>) -> Array1<f64> {
    let mut probs = Array1::zeros(weights.len());
    softmax_into(weights, probs.view_mut());
    probs
}

/// Negative log-likelihood `−Σ_i c_i · (w_i − ln Z(w))` of the observed
/// counts under `softmax(w)`.
///
/// # Errors
/// - [`MaxEntError::WeightLengthMismatch`] if `weights.len() != model.len()`.
pub fn negative_log_likelihood(
    weights: ArrayView1<f64>, model: &UnigramModel,
) -> MaxEntResult<f64> {
    validate_weight_len(weights, model)?;
    let log_partition = log_sum_exp(weights);
    let ll: f64 = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| model.count_f64(i) * (w - log_partition))
        .sum();
    trace!("p = {weights:.10} ==eval==> {:.6}", -ll);
    Ok(-ll)
}

/// Gradient of [`negative_log_likelihood`] written into `out`.
///
/// `out[i] = N · p_i − c_i`. The softmax normalizer is computed once and
/// shared across all indices; `out` is overwritten, never accumulated into.
///
/// # Errors
/// - [`MaxEntError::WeightLengthMismatch`] if `weights.len() != model.len()`.
/// - [`MaxEntError::GradientBufferMismatch`] if `out.len() != model.len()`.
pub fn gradient_into(
    weights: ArrayView1<f64>, model: &UnigramModel, mut out: ArrayViewMut1<f64>,
) -> MaxEntResult<()> {
    validate_weight_len(weights, model)?;
    if out.len() != model.len() {
        return Err(MaxEntError::GradientBufferMismatch {
            expected: model.len(),
            actual: out.len(),
        });
    }
    softmax_into(weights, out.view_mut());
    let n = model.total_f64();
    for (i, g) in out.iter_mut().enumerate() {
        *g = -(model.count_f64(i) - n * *g);
    }
    trace!("grad|_{weights:.10} ==grad==> {out:.6}");
    Ok(())
}

/// Allocating wrapper around [`gradient_into`].
pub fn gradient(weights: ArrayView1<f64>, model: &UnigramModel) -> MaxEntResult<Grad> {
    let mut grad = Array1::zeros(model.len());
    gradient_into(weights, model, grad.view_mut())?;
    Ok(grad)
}

/// Value and gradient in one call.
///
/// Calls [`negative_log_likelihood`] and [`gradient`] in turn, so the pair is
/// bit-identical to two separate calls at the same point.
pub fn value_and_gradient(
    weights: ArrayView1<f64>, model: &UnigramModel,
) -> MaxEntResult<(f64, Grad)> {
    let value = negative_log_likelihood(weights, model)?;
    let grad = gradient(weights, model)?;
    Ok((value, grad))
}

/// Reject weight vectors that are the wrong length or contain NaN / ±∞.
pub fn validate_weights(weights: ArrayView1<f64>, model: &UnigramModel) -> MaxEntResult<()> {
    validate_weight_len(weights, model)?;
    match weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
        Some((index, &value)) => Err(MaxEntError::NonFiniteWeight { index, value }),
        None => Ok(()),
    }
}

fn validate_weight_len(weights: ArrayView1<f64>, model: &UnigramModel) -> MaxEntResult<()> {
    if weights.len() != model.len() {
        return Err(MaxEntError::WeightLengthMismatch {
            expected: model.len(),
            actual: weights.len(),
        });
    }
    Ok(())
}

/// The unigram NLL exposed through the optimizer's [`Objective`] trait.
///
/// Stateless: the counts travel as `Data`, so one objective value serves any
/// [`UnigramModel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnigramObjective;

impl Objective for UnigramObjective {
    type Data = UnigramModel;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        Ok(negative_log_likelihood(theta.view(), data)?)
    }

    fn gradient(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        Ok(gradient(theta.view(), data)?)
    }

    fn value_and_gradient(&self, theta: &Theta, data: &Self::Data) -> OptResult<(Cost, Grad)> {
        Ok(value_and_gradient(theta.view(), data)?)
    }

    /// Length and finiteness of the starting point.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        Ok(validate_weights(theta.view(), data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form agreement of partition, NLL and gradient at (3.2, -2.0).
    // - Idempotence and the combined evaluator contract.
    // - Shift behavior of the partition and the probabilities.
    // - Shape validation of weights and gradient buffers.
    //
    // They intentionally DO NOT cover:
    // - Optimizer behavior (see `verification` and the integration tests).
    // -------------------------------------------------------------------------

    const EPS: f64 = 1e-6;

    fn test_point() -> Theta {
        array![3.2, -2.0]
    }

    #[test]
    // Purpose
    // -------
    // Partition at (3.2, -2.0) equals e^3.2 + e^-2.0.
    fn partition_matches_closed_form() {
        let z = partition(test_point().view());

        assert_abs_diff_eq!(z, 3.2f64.exp() + (-2.0f64).exp(), epsilon = EPS);
    }

    #[test]
    // Purpose
    // -------
    // NLL at (3.2, -2.0) under counts [2, 1] equals
    // -2·ln(e^3.2/Z) - ln(e^-2.0/Z).
    fn nll_matches_closed_form() {
        // Arrange
        let model = UnigramModel::fixture();
        let z = 3.2f64.exp() + (-2.0f64).exp();
        let expected = -2.0 * (3.2f64.exp() / z).ln() - ((-2.0f64).exp() / z).ln();

        // Act
        let nll = negative_log_likelihood(test_point().view(), &model).unwrap();

        // Assert
        assert_abs_diff_eq!(nll, expected, epsilon = EPS);
    }

    #[test]
    // Purpose
    // -------
    // Gradient at (3.2, -2.0) equals (-2 + 3·e^3.2/Z, -1 + 3·e^-2.0/Z).
    fn gradient_matches_closed_form() {
        // Arrange
        let model = UnigramModel::fixture();
        let z = 3.2f64.exp() + (-2.0f64).exp();

        // Act
        let g = gradient(test_point().view(), &model).unwrap();

        // Assert
        assert_abs_diff_eq!(g[0], -2.0 + 3.0 * 3.2f64.exp() / z, epsilon = EPS);
        assert_abs_diff_eq!(g[1], -1.0 + 3.0 * (-2.0f64).exp() / z, epsilon = EPS);
    }

    #[test]
    // Purpose
    // -------
    // Gradient entries sum to zero: Σ (N·p_i − c_i) = N − N.
    fn gradient_entries_sum_to_zero() {
        let model = UnigramModel::new(vec![5, 3, 1]).unwrap();
        let w = array![0.3, -1.7, 2.2];

        let g = gradient(w.view(), &model).unwrap();

        assert_abs_diff_eq!(g.sum(), 0.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Evaluating twice at an unchanged point gives identical bits, and the
    // combined evaluator equals the separate calls exactly.
    fn evaluators_are_idempotent_and_combined_matches_separate() {
        // Arrange
        let model = UnigramModel::fixture();
        let w = test_point();

        // Act
        let v1 = negative_log_likelihood(w.view(), &model).unwrap();
        let v2 = negative_log_likelihood(w.view(), &model).unwrap();
        let g1 = gradient(w.view(), &model).unwrap();
        let g2 = gradient(w.view(), &model).unwrap();
        let (vc, gc) = value_and_gradient(w.view(), &model).unwrap();

        // Assert
        assert_eq!(v1.to_bits(), v2.to_bits());
        assert_eq!(g1, g2);
        assert_eq!(vc.to_bits(), v1.to_bits());
        assert_eq!(gc, g1);
        assert_eq!(w, test_point());
    }

    #[test]
    // Purpose
    // -------
    // A common shift c scales the partition by e^c but leaves the
    // probabilities unchanged.
    //
    // Given
    // -----
    // - w = (3.2, -2.0) and w + c·[1, 1] for several c.
    //
    // Expect
    // ------
    // - Z(w + c) / Z(w) = e^c (relative check).
    // - prob(w + c) = prob(w) elementwise.
    fn shift_scales_partition_and_preserves_probabilities() {
        let w = test_point();
        let z = partition(w.view());
        let p = probabilities(w.view());
        for c in [-7.5, -0.25, 1.0, 13.0] {
            let shifted = w.mapv(|v| v + c);

            let z_shift = partition(shifted.view());
            let p_shift = probabilities(shifted.view());

            assert_abs_diff_eq!(z_shift / z, c.exp(), epsilon = 1e-9 * c.exp());
            assert_abs_diff_eq!(p_shift[0], p[0], epsilon = 1e-12);
            assert_abs_diff_eq!(p_shift[1], p[1], epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // `gradient_into` overwrites the buffer rather than accumulating.
    fn gradient_into_overwrites_buffer() {
        // Arrange
        let model = UnigramModel::fixture();
        let mut out = array![100.0, -100.0];

        // Act
        gradient_into(array![0.0, 0.0].view(), &model, out.view_mut()).unwrap();

        // Assert
        assert_abs_diff_eq!(out[0], -0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(out[1], 0.5, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Shape mismatches surface as errors rather than panics.
    fn mismatched_lengths_are_rejected() {
        let model = UnigramModel::fixture();
        let w3 = array![0.0, 0.0, 0.0];
        let mut short = Array1::zeros(1);

        assert_eq!(
            negative_log_likelihood(w3.view(), &model),
            Err(MaxEntError::WeightLengthMismatch { expected: 2, actual: 3 })
        );
        assert_eq!(
            gradient_into(array![0.0, 0.0].view(), &model, short.view_mut()),
            Err(MaxEntError::GradientBufferMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // `check` on the objective rejects the first non-finite weight.
    fn check_rejects_non_finite_weight() {
        let model = UnigramModel::fixture();
        let w = array![0.0, f64::NAN];

        let err = validate_weights(w.view(), &model).unwrap_err();

        assert!(matches!(err, MaxEntError::NonFiniteWeight { index: 1, .. }));
        assert!(UnigramObjective.check(&array![0.0, 0.0], &model).is_ok());
    }
}
