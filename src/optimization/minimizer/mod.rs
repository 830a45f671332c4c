//! minimizer — argmin-backed L-BFGS minimization of a differentiable objective.
//!
//! Purpose
//! -------
//! Run a quasi-Newton minimizer over an objective `f(θ)` that supplies its own
//! value and gradient, and normalize whatever the backend reports into an
//! [`OptimOutcome`]. Callers implement [`Objective`] and call [`minimize`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::ObjectiveAdapter`] exposes an [`Objective`] to argmin as a
//!   `CostFunction` + `Gradient`, rejecting non-finite values.
//! - [`minimize`] validates the start point with [`Objective::check`], builds
//!   L-BFGS with the configured [`LineSearcher`] via [`builders`], and runs it
//!   through [`run::run_lbfgs`].
//! - [`observer::IterationTrace`] records every completed iterate, so a run
//!   the backend aborts still reports the last point reached.
//! - [`test_gradient`] applies the gradient-norm acceptance test to any
//!   gradient after the fact.
//! - [`finite_diff::central_gradient`] estimates `∇f(θ)` numerically for
//!   checking analytic gradients.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is the quantity being minimized; values and gradients pass
//!   through the adapter unchanged.
//! - [`Tolerances`] and [`SolveOptions`] are validated on construction.
//! - Errors surface as [`OptResult<T>`](crate::optimization::errors::OptResult);
//!   nothing here intentionally panics.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule.
//! - `tests/integration_selfcheck.rs` drives [`minimize`] on the unigram
//!   objective with both line searches.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod convergence;
pub mod finite_diff;
pub mod observer;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::convergence::{GradientTest, test_gradient};
pub use self::traits::{
    LineSearcher, Objective, OptimOutcome, OptimStatus, SolveOptions, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::convergence::{GradientTest, test_gradient};
    pub use super::traits::{Objective, OptimOutcome, OptimStatus, SolveOptions, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
