//! verification::errors — failures that stop the self-check before it can
//! report.
//!
//! Numeric disagreements are never errors here: they become `BAD` report
//! lines. [`SelfCheckError`] covers what prevents a report from being
//! produced at all: an invalid [`HarnessConfig`](crate::verification::HarnessConfig),
//! a config that does not fit the model, or a model / optimizer error that
//! the evaluators raise on input they should never have received.

use crate::optimization::errors::OptError;
use crate::unigram::errors::MaxEntError;

pub type SelfCheckResult<T> = Result<T, SelfCheckError>;

/// Error conditions for building or running the self-check harness.
#[derive(Debug, Clone, PartialEq)]
pub enum SelfCheckError {
    // ---- Configuration ----
    /// A comparison or acceptance tolerance is non-finite or ≤ 0.
    InvalidTolerance { name: &'static str, value: f64 },
    /// A configured point is empty.
    EmptyPoint { name: &'static str },
    /// A configured point has a non-finite entry.
    NonFinitePoint { name: &'static str, index: usize, value: f64 },
    /// A configured point does not have one entry per count.
    PointLengthMismatch { name: &'static str, expected: usize, actual: usize },

    // ---- Wrapped ----
    Model(MaxEntError),
    Optimizer(OptError),
}

impl std::error::Error for SelfCheckError {}

impl std::fmt::Display for SelfCheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelfCheckError::InvalidTolerance { name, value } => {
                write!(f, "Invalid {name} {value}: must be finite and positive.")
            }
            SelfCheckError::EmptyPoint { name } => write!(f, "The {name} is empty."),
            SelfCheckError::NonFinitePoint { name, index, value } => {
                write!(f, "The {name} has a non-finite entry {value} at index {index}.")
            }
            SelfCheckError::PointLengthMismatch { name, expected, actual } => {
                write!(f, "The {name} has {actual} entries, expected {expected}.")
            }
            SelfCheckError::Model(err) => write!(f, "Model error: {err}"),
            SelfCheckError::Optimizer(err) => write!(f, "Optimizer error: {err}"),
        }
    }
}

impl From<MaxEntError> for SelfCheckError {
    fn from(err: MaxEntError) -> Self {
        SelfCheckError::Model(err)
    }
}

impl From<OptError> for SelfCheckError {
    fn from(err: OptError) -> Self {
        SelfCheckError::Optimizer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages carry their payload, and wrapped errors keep the
    // inner message.
    fn display_includes_payload_and_inner_message() {
        let tol = SelfCheckError::InvalidTolerance { name: "comparison tolerance", value: -1.0 };
        let wrapped: SelfCheckError = MaxEntError::EmptyCounts.into();

        assert!(tol.to_string().contains("comparison tolerance"));
        assert!(tol.to_string().contains("-1"));
        assert!(wrapped.to_string().contains(&MaxEntError::EmptyCounts.to_string()));
    }
}
