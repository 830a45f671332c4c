//! Public API surface for objective minimization.
//!
//! - [`Objective`]: the value / gradient / combined capability set a model
//!   implements.
//! - [`SolveOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimStatus`] and [`OptimOutcome`]: normalized result returned by
//!   [`minimize`](crate::optimization::minimizer::minimize).
//!
//! Convention: the objective is the quantity being **minimized** (for the
//! unigram model, the negative log-likelihood). Gradients are gradients of
//! that same quantity; the adapter passes both through unchanged.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Cost, FnEvalMap, Grad, Theta,
        observer::IterRecord,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Capability set of a differentiable scalar objective `f(θ)`.
///
/// - `type Data`: per-model data carried into every call (the counts, for
///   the unigram model).
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `f(θ)`.
/// - `gradient(&Theta, &Data) -> OptResult<Grad>`: evaluate `∇f(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject obviously invalid
///   `θ`/`data` pairs. Called once before optimization.
///
/// Provided:
/// - `value_and_gradient`: both at once. The default calls `value` then
///   `gradient`; overrides must return exactly what the two separate calls
///   would.
pub trait Objective {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn gradient(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Provided methods
    fn value_and_gradient(&self, theta: &Theta, data: &Self::Data) -> OptResult<(Cost, Grad)> {
        Ok((self.value(theta, data)?, self.gradient(theta, data)?))
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing:
/// Implements `FromStr`, accepting case-insensitive `"MoreThuente"` and
/// `"HagerZhang"`. Unknown names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances`: stopping tolerances and iteration limit.
/// - `line_searcher: LineSearcher`: line search used by L-BFGS.
/// - `verbose: bool`: if `true`, attaches a terminal slog observer (behind
///   the `obs_slog` feature) and logs the starting point.
/// - `lbfgs_mem: Option<usize>`: L-BFGS history size, `None` for
///   [`DEFAULT_LBFGS_MEM`](crate::optimization::minimizer::DEFAULT_LBFGS_MEM).
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 100`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl SolveOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** must be provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - Provided tolerances must be **finite and strictly positive**.
    /// - Provided `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for bad tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(100) }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimStatus {
    /// The solver's own stopping rule fired (gradient norm or cost change).
    Converged,
    /// The iteration cap was hit first.
    MaxItersReached,
    /// Any other termination reason reported by the solver.
    Terminated(String),
    /// The solver never reported termination.
    NotTerminated,
    /// The solver failed mid-run; the outcome holds the last iterate reached.
    Aborted(OptError),
}

impl OptimStatus {
    fn from_termination(status: &TerminationStatus) -> Self {
        match status {
            TerminationStatus::NotTerminated => OptimStatus::NotTerminated,
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                OptimStatus::Converged
            }
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                OptimStatus::MaxItersReached
            }
            TerminationStatus::Terminated(other) => OptimStatus::Terminated(format!("{other:?}")),
        }
    }
}

impl std::fmt::Display for OptimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimStatus::Converged => write!(f, "converged"),
            OptimStatus::MaxItersReached => write!(f, "max iterations reached"),
            OptimStatus::Terminated(reason) => write!(f, "terminated ({reason})"),
            OptimStatus::NotTerminated => write!(f, "not terminated"),
            OptimStatus::Aborted(err) => write!(f, "aborted ({err})"),
        }
    }
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: best parameter vector found (last iterate reached when
///   `status` is `Aborted`).
/// - `value`: objective value at `theta_hat`; `NaN` only for an aborted run
///   whose start point could not be evaluated.
/// - `status`: how the run ended.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
/// - `trace`: one record per completed iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub status: OptimStatus,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub trace: Vec<IterRecord>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: &TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>, trace: Vec<IterRecord>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let status = OptimStatus::from_termination(termination);
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, status, iterations, fn_evals, grad_norm, trace })
    }

    /// Outcome for a run the solver aborted with `err`.
    ///
    /// The last traced iterate is reported; without one, the start point and
    /// its value (`start_value`) stand in.
    pub fn aborted(
        err: OptError, theta0: Theta, start_value: Option<f64>, trace: Vec<IterRecord>,
    ) -> Self {
        let (theta_hat, value, grad_norm) = match trace.last() {
            Some(rec) => (rec.theta.clone(), rec.cost, rec.grad_norm),
            None => (theta0, start_value.unwrap_or(f64::NAN), None),
        };
        Self {
            theta_hat,
            value,
            status: OptimStatus::Aborted(err),
            iterations: trace.len(),
            fn_evals: FnEvalMap::new(),
            grad_norm,
            trace,
        }
    }

    /// `true` when the solver's stopping rule fired.
    pub fn converged(&self) -> bool {
        self.status == OptimStatus::Converged
    }
}
