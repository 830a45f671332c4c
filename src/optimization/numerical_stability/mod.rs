//! numerical_stability — overflow-safe softmax and log-sum-exp.
//!
//! Purpose
//! -------
//! Collect the numerically stable exponential-sum transforms used by the
//! unigram objective so that the log-partition and category probabilities
//! stay finite for any finite log-weights.
//!
//! Key behaviors
//! -------------
//! - `log_sum_exp`: max-shifted `ln(Σ exp(x_i))`.
//! - `softmax_into`: max-shifted softmax into a caller-owned buffer with a
//!   single shared normalizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; shape checks happen in the model layer.
//! - Helpers never log, allocate (beyond iterator temporaries) or touch
//!   global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naïve formulas on
//!   safe inputs, check large-weight behavior and softmax shift invariance.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{log_sum_exp, softmax_into};

pub mod prelude {
    pub use super::transformations::{log_sum_exp, softmax_into};
}
