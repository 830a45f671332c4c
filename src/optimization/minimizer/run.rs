//! Execution helper that runs an `argmin` solver on an objective and returns
//! a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Objective, OptimOutcome, SolveOptions, Theta,
        adapter::ObjectiveAdapter,
        observer::{IterationTrace, MinimizerState},
    },
};
use argmin::core::{CostFunction, Executor, State, observers::ObserverMode};
#[cfg(feature = "obs_slog")]
use argmin::core::Gradient;
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
use log::{info, warn};

/// Run an `argmin` optimization for an objective.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the user objective via [`ObjectiveAdapter`],
/// - the chosen `Solver` (L-BFGS with Hager–Zhang or More–Thuente),
/// - the start point `theta0`,
/// - an [`IterationTrace`] observer, plus a terminal slog observer when the
///   `obs_slog` feature is enabled and `opts.verbose` is set,
/// - optional `max_iters`,
///   then executes the solver and converts the result into [`OptimOutcome`].
///
/// # Failed runs
/// - A line search that fails (including an objective error raised while it
///   probes a step) is caught by L-BFGS itself. The run finishes normally
///   with [`OptimStatus::Terminated`](crate::optimization::minimizer::OptimStatus)
///   carrying argmin's `SolverExit` reason, and `theta_hat` is the last
///   accepted iterate.
/// - Any other solver error (e.g. the objective failing at `theta0` or in the
///   gradient evaluation after an accepted step) makes the executor return
///   `Err`. That is reported as
///   [`OptimStatus::Aborted`](crate::optimization::minimizer::OptimStatus)
///   carrying the last traced iterate, or `theta0` if none completed.
///
/// # Errors
/// - Validation errors when constructing [`OptimOutcome`] from a finished run.
/// - Observer set-up errors under `obs_slog`.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &SolveOptions, problem: ObjectiveAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: argmin::core::Solver<ObjectiveAdapter<'a, F>, MinimizerState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let start_value = problem.cost(&theta0).ok();
    let trace = IterationTrace::new();
    let start = theta0.clone();

    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    optimizer = optimizer.add_observer(trace.clone(), ObserverMode::Always);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = match optimizer.run() {
        Ok(res) => res.state().clone(),
        Err(e) => {
            let err = OptError::from(e);
            warn!("optimizer aborted: {err}");
            return Ok(OptimOutcome::aborted(err, start, start_value, trace.records()));
        }
    };
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let outcome = OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        &termination,
        iterations,
        function_counts,
        grad,
        trace.records(),
    )?;
    info!("optimizer finished after {} iterations: {}", outcome.iterations, outcome.status);
    Ok(outcome)
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ObjectiveAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let f0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: f(theta0) = {:.6}{}",
        f0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
