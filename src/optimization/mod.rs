//! optimization — L-BFGS minimizer, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Provide the numerical machinery the unigram fit runs on: an argmin-backed
//! minimizer (`minimizer`), overflow-safe softmax helpers
//! (`numerical_stability`), and a single error enum for everything that can
//! go wrong on the way (`errors::OptError`).
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray` vectors (`Theta`, `Grad`).
//! - Entry points that can fail return `OptResult<T>`; raw argmin errors and
//!   model errors are converted before they reach callers.
//! - Library code logs through the `log` facade only.
//!
//! Downstream usage
//! ----------------
//! Import the curated surface with `optimization::prelude::*`, or reach into
//! `minimizer` / `numerical_stability` directly.

pub mod errors;
pub mod minimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
