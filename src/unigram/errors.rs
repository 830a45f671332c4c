//! Errors for the unigram maximum-entropy model (count validation and
//! weight/count shape checks).
//!
//! This module defines the model error type, [`MaxEntError`], used by the
//! model constructor, the evaluators, and the closed-form oracle. It
//! implements `Display`/`Error` and converts into the optimizer's
//! [`OptError`](crate::optimization::errors::OptError) so that model failures
//! surface through the optimization layer unchanged.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions in the count sequence.
//! - Counts are non-negative by construction (`u32`); the only count-level
//!   failures are an empty sequence or a zero total.
//! - Weight vectors must have exactly one entry per count.

/// Result alias for model construction and evaluation.
pub type MaxEntResult<T> = Result<T, MaxEntError>;

/// Unified error type for the unigram model.
#[derive(Debug, Clone, PartialEq)]
pub enum MaxEntError {
    // ---- Count validation ----
    /// The count sequence is empty.
    EmptyCounts,

    /// All counts are zero, so no likelihood can be formed.
    ZeroTotalCount,

    /// A count of zero has no finite log-count; the optimum is at -inf.
    ZeroCount { index: usize },

    // ---- Weight / count shape ----
    /// Weight vector length does not match the number of counts.
    WeightLengthMismatch { expected: usize, actual: usize },

    /// Output buffer length does not match the number of counts.
    GradientBufferMismatch { expected: usize, actual: usize },

    /// Weight entries must be finite.
    NonFiniteWeight { index: usize, value: f64 },
}

impl std::error::Error for MaxEntError {}

impl std::fmt::Display for MaxEntError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Count validation ----
            MaxEntError::EmptyCounts => {
                write!(f, "Count sequence is empty.")
            }
            MaxEntError::ZeroTotalCount => {
                write!(f, "Total count must be strictly positive.")
            }
            MaxEntError::ZeroCount { index } => {
                write!(f, "Count at index {index} is zero; its log-count is not finite.")
            }

            // ---- Weight / count shape ----
            MaxEntError::WeightLengthMismatch { expected, actual } => {
                write!(f, "Weight vector length mismatch: expected {expected}, got {actual}")
            }
            MaxEntError::GradientBufferMismatch { expected, actual } => {
                write!(f, "Gradient buffer length mismatch: expected {expected}, got {actual}")
            }
            MaxEntError::NonFiniteWeight { index, value } => {
                write!(f, "Weight at index {index} is non-finite: {value}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that the length-mismatch message names both lengths.
    fn weight_length_mismatch_display_names_both_lengths() {
        let err = MaxEntError::WeightLengthMismatch { expected: 2, actual: 3 };

        let msg = err.to_string();

        assert!(msg.contains("expected 2"));
        assert!(msg.contains("got 3"));
    }
}
