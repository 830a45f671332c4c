//! Hand-derived reference values used as test oracles.
//!
//! Every quantity here is written out directly from its defining formula,
//! with no shared code path with [`objective`](crate::unigram::objective):
//! plain `exp` / `ln`, no max-shift, no softmax buffer. Agreement between the
//! two is what the self-check verifies.
//!
//! ## The optimum
//! Setting the gradient to zero gives `p_i = c_i / N`, i.e.
//! `w_i = ln c_i + k` for any constant `k`: the objective is flat along
//! `(1, …, 1)`. Because every gradient sums to zero, a quasi-Newton run
//! started at the origin never leaves the plane `Σ w_i = 0`, which picks
//! `k = −mean_j ln c_j`. For counts `[2, 1]` that is
//! `(ln 2 / 2, −ln 2 / 2) ≈ (0.346574, −0.346574)`.
use ndarray::{Array1, ArrayView1};

use crate::unigram::{
    errors::{MaxEntError, MaxEntResult},
    model::UnigramModel,
};

/// Rounded optimum for the fixture counts `[2, 1]`, as quoted to six decimals.
pub const FIXTURE_OPTIMUM: [f64; 2] = [0.346574, -0.346574];

/// `Z = Σ_i e^{w_i}`.
pub fn expected_partition(weights: ArrayView1<f64>) -> f64 {
    weights.iter().fold(0.0, |z, &w| z + w.exp())
}

/// `−Σ_i c_i · ln(e^{w_i} / Z)`.
///
/// # Errors
/// - [`MaxEntError::WeightLengthMismatch`] if the lengths disagree.
pub fn expected_nll(weights: ArrayView1<f64>, model: &UnigramModel) -> MaxEntResult<f64> {
    check_len(weights, model)?;
    let z = expected_partition(weights);
    Ok(weights
        .iter()
        .zip(model.counts())
        .map(|(&w, &c)| -f64::from(c) * (w.exp() / z).ln())
        .sum())
}

/// `g_i = −c_i + N · e^{w_i} / Z`.
///
/// # Errors
/// - [`MaxEntError::WeightLengthMismatch`] if the lengths disagree.
pub fn expected_gradient(
    weights: ArrayView1<f64>, model: &UnigramModel,
) -> MaxEntResult<Array1<f64>> {
    check_len(weights, model)?;
    let z = expected_partition(weights);
    let n = model.total() as f64;
    Ok(weights
        .iter()
        .zip(model.counts())
        .map(|(&w, &c)| -f64::from(c) + n * w.exp() / z)
        .collect())
}

/// Zero-sum maximum-likelihood weights: centered log counts.
///
/// # Errors
/// - [`MaxEntError::ZeroCount`] for the first zero count, whose optimal
///   weight is `−∞`.
pub fn expected_optimum(model: &UnigramModel) -> MaxEntResult<Array1<f64>> {
    if let Some(index) = model.counts().iter().position(|&c| c == 0) {
        return Err(MaxEntError::ZeroCount { index });
    }
    let logs: Array1<f64> = model.counts().iter().map(|&c| f64::from(c).ln()).collect();
    let mean = logs.sum() / logs.len() as f64;
    Ok(logs.mapv(|l| l - mean))
}

fn check_len(weights: ArrayView1<f64>, model: &UnigramModel) -> MaxEntResult<()> {
    if weights.len() != model.len() {
        return Err(MaxEntError::WeightLengthMismatch {
            expected: model.len(),
            actual: weights.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unigram::objective;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The derived optimum for [2, 1] is (ln 2 / 2, −ln 2 / 2) and the quoted
    // six-decimal constant lies within 1e-6 of it.
    fn fixture_optimum_is_half_log_two() {
        // Act
        let opt = expected_optimum(&UnigramModel::fixture()).unwrap();

        // Assert
        let half_ln2 = 0.5 * 2f64.ln();
        assert_abs_diff_eq!(opt[0], half_ln2, epsilon = 1e-15);
        assert_abs_diff_eq!(opt[1], -half_ln2, epsilon = 1e-15);
        assert_abs_diff_eq!(opt[0], FIXTURE_OPTIMUM[0], epsilon = 1e-6);
        assert_abs_diff_eq!(opt[1], FIXTURE_OPTIMUM[1], epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // The objective's gradient vanishes at the derived optimum, and the
    // optimum reproduces the observed frequencies.
    //
    // Given
    // -----
    // - Counts [5, 3, 1].
    //
    // Expect
    // ------
    // - ‖∇f(w*)‖ ≈ 0 and softmax(w*) = c / N.
    fn optimum_zeroes_gradient_and_matches_frequencies() {
        // Arrange
        let model = UnigramModel::new(vec![5, 3, 1]).unwrap();

        // Act
        let opt = expected_optimum(&model).unwrap();
        let g = objective::gradient(opt.view(), &model).unwrap();
        let p = objective::probabilities(opt.view());

        // Assert
        assert!(g.iter().all(|v| v.abs() < 1e-12));
        assert_abs_diff_eq!(opt.sum(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0], 5.0 / 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[2], 1.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A zero count has no finite optimum.
    fn zero_count_has_no_finite_optimum() {
        let model = UnigramModel::new(vec![3, 0]).unwrap();

        assert_eq!(expected_optimum(&model), Err(MaxEntError::ZeroCount { index: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // The closed-form NLL and gradient reject a mis-sized point.
    fn closed_forms_reject_mismatched_lengths() {
        let model = UnigramModel::fixture();
        let w = array![1.0];

        assert!(expected_nll(w.view(), &model).is_err());
        assert!(expected_gradient(w.view(), &model).is_err());
    }
}
