//! High-level entry point for minimizing a user-provided `Objective`.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the objective in an `ObjectiveAdapter`, and delegates the run
//! to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        OptimOutcome, Theta,
        adapter::ObjectiveAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, Objective, SolveOptions},
    },
};

/// Minimize an objective `f(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the start point via `f.check(&theta0, data)`.
/// - Builds an L-BFGS solver with **Hager–Zhang** or **More–Thuente** line
///   search based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor and returns an
///   [`OptimOutcome`].
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates outcome validation errors from `run_lbfgs`. Solver failures
///   mid-run are reported through the outcome's status instead.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use maxent_unigram::optimization::minimizer::{minimize, SolveOptions};
/// use maxent_unigram::unigram::{UnigramModel, UnigramObjective};
///
/// let model = UnigramModel::fixture();
/// let out = minimize(&UnigramObjective, array![0.0, 0.0], &model, &SolveOptions::default())?;
/// println!("w = {}", out.theta_hat);
/// # Ok::<(), maxent_unigram::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &SolveOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ObjectiveAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
