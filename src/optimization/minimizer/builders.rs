//! minimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small builders for the L-BFGS solvers used by the minimizer. They
//! hide argmin's generic wiring and apply crate-level options (tolerances,
//! memory size) so higher-level code can request a configured solver without
//! touching argmin types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set the start point or `max_iters`; the runner
//!   applies those to the executor state.
//! - Line searches keep argmin's defaults; for More–Thuente that is the
//!   sufficient-decrease constant `c1 = 1e-4` and curvature constant
//!   `c2 = 0.9`.
//! - Errors are reported via [`OptResult`]; argmin errors never leak across
//!   the module boundary.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::SolveOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search and the tolerances in `opts`.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if argmin rejects a
///   tolerance.
pub fn build_optimizer_hager_zhang(opts: &SolveOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search and the tolerances in `opts`.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if argmin rejects a
///   tolerance.
pub fn build_optimizer_more_thuente(opts: &SolveOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient and cost-change tolerances to an L-BFGS solver,
/// whatever its line search. A `None` tolerance leaves argmin's default.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &SolveOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
