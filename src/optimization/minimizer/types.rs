//! minimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the minimizer so
//! the rest of the optimization code stays agnostic to `ndarray` and argmin
//! generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors with one entry per outcome.
//! - `Cost` is the scalar objective being minimized (the negative
//!   log-likelihood for the unigram model).
//! - The line-search aliases use argmin's three-parameter form
//!   `(Param, Gradient, Float)`.
//!
//! Testing notes
//! -------------
//! - Aliases and constants only; exercised by the surrounding modules.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Weight vector `w` being optimized.
pub type Theta = Array1<f64>;

/// Gradient `∇f(w)`, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value `f(w)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
