//! Numerical stability utilities.
//!
//! Provides max-shifted implementations of the exponential-sum transforms
//! that overflow in naïve form once a log-weight exceeds roughly 709.
//! Subtracting the largest entry before exponentiating keeps every
//! exponential in `(0, 1]`, the same guarded strategy used by common ML
//! libraries for softmax and log-sum-exp.
//!
//! # Provided items
//! - [`log_sum_exp(x)`]: stable `ln(Σ exp(x_i))`.
//! - [`softmax_into(x, out)`]: stable `exp(x_i) / Σ exp(x_j)` written into a
//!   caller-owned buffer, sharing one normalizer across all entries.
//!
//! # Rationale
//! The log-partition and the category probabilities of a softmax model are
//! both functions of the same normalizer. Computing them through these
//! helpers keeps the objective and gradient finite for any finite weights.
use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Numerically stable `ln(Σ_i exp(x_i))`.
///
/// Uses `m + ln(Σ_i exp(x_i − m))` with `m = max_i x_i`, so the largest
/// shifted exponential is exactly 1 and the sum never overflows.
///
/// # Parameters
/// - `x`: finite input values; must be non-empty.
///
/// # Returns
/// - `ln(Σ exp(x_i))`, or `-∞` for an empty view.
pub fn log_sum_exp(x: ArrayView1<f64>) -> f64 {
    let m = max_entry(x);
    if !m.is_finite() {
        return m;
    }
    let shifted_sum: f64 = x.iter().map(|&v| (v - m).exp()).sum();
    m + shifted_sum.ln()
}

/// Numerically stable softmax written into `out`.
///
/// Computes `out[i] = exp(x_i − m) / Σ_j exp(x_j − m)` with `m = max_j x_j`.
/// The normalizer is evaluated once and shared by every index.
///
/// # Parameters
/// - `x`: finite input values.
/// - `out`: buffer of the same length as `x`; fully overwritten.
///
/// # Panics
/// - If `x.len() != out.len()` (ndarray `Zip` shape check). Callers
///   validate lengths before calling.
pub fn softmax_into(x: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
    let m = max_entry(x);
    Zip::from(&mut out).and(&x).for_each(|o, &v| *o = (v - m).exp());
    let norm = out.sum();
    out.mapv_inplace(|v| v / norm);
}

// ---- Helper methods ----

fn max_entry(x: ArrayView1<f64>) -> f64 {
    x.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the stable transforms with naïve formulas on safe inputs.
    // - Behavior for weights large enough to overflow the naïve forms.
    // - Shift invariance of the softmax.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `log_sum_exp` matches `ln(Σ exp)` where the naïve form is safe.
    fn log_sum_exp_matches_naive_formula() {
        // Arrange
        let x = array![3.2, -2.0, 0.5];
        let naive = x.iter().map(|v: &f64| v.exp()).sum::<f64>().ln();

        // Act
        let lse = log_sum_exp(x.view());

        // Assert
        assert_abs_diff_eq!(lse, naive, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Large weights stay finite: ln(e^1000 + e^1000) = 1000 + ln 2.
    fn log_sum_exp_is_finite_for_large_weights() {
        let x = array![1000.0, 1000.0];

        let lse = log_sum_exp(x.view());

        assert_abs_diff_eq!(lse, 1000.0 + 2f64.ln(), epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Softmax output sums to one and is unchanged by a common shift.
    //
    // Given
    // -----
    // - `x = (3.2, -2.0)` and `x + 41.5`.
    //
    // Expect
    // ------
    // - Both outputs sum to 1 and agree elementwise.
    fn softmax_sums_to_one_and_is_shift_invariant() {
        // Arrange
        let x = array![3.2, -2.0];
        let shifted = x.mapv(|v| v + 41.5);
        let mut p = Array1::zeros(2);
        let mut q = Array1::zeros(2);

        // Act
        softmax_into(x.view(), p.view_mut());
        softmax_into(shifted.view(), q.view_mut());

        // Assert
        assert_abs_diff_eq!(p.sum(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p[0], q[0], epsilon = 1e-15);
        assert_abs_diff_eq!(p[1], q[1], epsilon = 1e-15);
    }
}
