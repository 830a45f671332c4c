//! verification::harness — the fit-and-verify state machine.
//!
//! Purpose
//! -------
//! Drive one complete self-check of the unigram model:
//!
//! ```text
//! INIT → CLOSED_FORM_CHECK → FINITE_DIFF_CHECK → OPTIMIZE → FINAL_CHECK → REPORT
//! ```
//!
//! Key behaviors
//! -------------
//! - CLOSED_FORM_CHECK compares partition, NLL and gradient at the test point
//!   with [`closed_form`] values.
//! - FINITE_DIFF_CHECK compares the analytic gradient with a central
//!   finite-difference estimate.
//! - OPTIMIZE runs L-BFGS from the start point. A failed line search ends
//!   the run as `Terminated(SolverExit(..))` at the last accepted iterate;
//!   other solver errors end it as `Aborted` at the last traced iterate.
//!   Either way the harness carries on: the fitted gradient is re-evaluated
//!   and passed through [`test_gradient`] for the status line.
//! - FINAL_CHECK compares each fitted weight with the centered log counts
//!   and, for the `[2, 1]` fixture, the fitted point with the quoted
//!   optimum [`FIXTURE_OPTIMUM`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Transitions run strictly forward; every stage runs exactly once.
//! - Numeric disagreement is recorded as a failed [`Check`], never as `Err`.
//!   `Err` is reserved for inputs the harness cannot evaluate at all.
use std::fmt;

use log::{info, warn};

use crate::{
    optimization::minimizer::{
        GradientTest, Objective, OptimOutcome, OptimStatus, finite_diff::central_gradient,
        minimize, test_gradient,
    },
    unigram::{
        UnigramModel, UnigramObjective,
        closed_form::{self, FIXTURE_OPTIMUM},
        model::FIXTURE_COUNTS,
        objective,
    },
    verification::{
        config::HarnessConfig,
        errors::SelfCheckResult,
        report::{Check, Report, fmt_point},
    },
};

/// Harness states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    ClosedFormCheck,
    FiniteDiffCheck,
    Optimize,
    FinalCheck,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "INIT",
            Stage::ClosedFormCheck => "CLOSED_FORM_CHECK",
            Stage::FiniteDiffCheck => "FINITE_DIFF_CHECK",
            Stage::Optimize => "OPTIMIZE",
            Stage::FinalCheck => "FINAL_CHECK",
            Stage::Report => "REPORT",
        };
        f.write_str(name)
    }
}

/// One self-check run over a model.
///
/// The optimizer and the finite-difference check drive `O`; the closed-form
/// checks and the status line always use the unigram evaluators directly.
#[derive(Debug, Clone)]
pub struct Harness<O = UnigramObjective> {
    config: HarnessConfig,
    model: UnigramModel,
    objective: O,
    stage: Stage,
    report: Report,
}

impl Harness {
    /// INIT for the fixture model `[2, 1]`.
    ///
    /// # Errors
    /// - Any [`HarnessConfig::validate`] error.
    /// - [`SelfCheckError::PointLengthMismatch`](crate::verification::SelfCheckError)
    ///   if the configured points are not of length 2.
    pub fn new(config: HarnessConfig) -> SelfCheckResult<Self> {
        Self::with_model(config, UnigramModel::fixture())
    }

    /// INIT for an arbitrary model.
    pub fn with_model(config: HarnessConfig, model: UnigramModel) -> SelfCheckResult<Self> {
        Self::with_objective(config, model, UnigramObjective)
    }
}

impl<O: Objective<Data = UnigramModel>> Harness<O> {
    /// INIT with a caller-supplied objective over the unigram counts.
    ///
    /// The config is re-validated here, so a struct literal that skipped
    /// [`HarnessConfig::new`] is rejected the same way.
    pub fn with_objective(
        config: HarnessConfig, model: UnigramModel, objective: O,
    ) -> SelfCheckResult<Self> {
        config.validate()?;
        config.verify_dim(model.len())?;
        info!("self-check {}: counts {:?}, total {}", Stage::Init, model.counts(), model.total());
        Ok(Self { config, model, objective, stage: Stage::Init, report: Report::new() })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every remaining stage and return the report.
    ///
    /// # Errors
    /// Model or optimizer errors raised before a verdict could be formed
    /// (e.g. a model with a zero count, whose optimum is not finite).
    pub fn run(mut self) -> SelfCheckResult<Report> {
        self.closed_form_check()?;
        self.finite_diff_check()?;
        let outcome = self.optimize()?;
        self.final_check(&outcome)?;
        self.report.set_outcome(outcome);
        self.enter(Stage::Report);
        Ok(self.report)
    }

    fn enter(&mut self, stage: Stage) {
        info!("self-check {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    fn closed_form_check(&mut self) -> SelfCheckResult<()> {
        self.enter(Stage::ClosedFormCheck);
        let tol = self.config.tolerance;
        let tp = self.config.test_point.view();
        let at = fmt_point(tp);

        self.report.push(Check::scalar(
            format!("Z{at}"),
            objective::partition(tp),
            closed_form::expected_partition(tp),
            tol,
        ));
        self.report.push(Check::scalar(
            format!("nLL{at}"),
            objective::negative_log_likelihood(tp, &self.model)?,
            closed_form::expected_nll(tp, &self.model)?,
            tol,
        ));
        self.report.push(Check::vector(
            format!("nGrad{at}"),
            objective::gradient(tp, &self.model)?.view(),
            closed_form::expected_gradient(tp, &self.model)?.view(),
            tol,
        ));
        Ok(())
    }

    fn finite_diff_check(&mut self) -> SelfCheckResult<()> {
        self.enter(Stage::FiniteDiffCheck);
        let tp = &self.config.test_point;
        let analytic = objective::gradient(tp.view(), &self.model)?;
        let numeric = central_gradient(&self.objective, tp, &self.model)?;
        self.report.push(Check::vector(
            format!("fdGrad{}", fmt_point(tp.view())),
            analytic.view(),
            numeric.view(),
            self.config.tolerance,
        ));
        Ok(())
    }

    fn optimize(&mut self) -> SelfCheckResult<OptimOutcome> {
        self.enter(Stage::Optimize);
        let outcome =
            minimize(&self.objective, self.config.start.clone(), &self.model, &self.config.solve)?;
        match &outcome.status {
            OptimStatus::Aborted(err) => {
                warn!("optimizer aborted after {} iterations: {err}", outcome.iterations)
            }
            OptimStatus::Converged => info!(
                "optimizer converged after {} iterations, nLL = {}",
                outcome.iterations, outcome.value
            ),
            status => warn!(
                "optimizer {status} after {} iterations, nLL = {}",
                outcome.iterations, outcome.value
            ),
        }

        let final_grad = objective::gradient(outcome.theta_hat.view(), &self.model)?;
        let verdict = test_gradient(&final_grad, self.config.grad_tolerance)?;
        let within_cap =
            self.config.solve.tols.max_iter.map_or(true, |cap| outcome.iterations <= cap);
        self.report.push(Check::status(
            "LBFGS optimization status",
            verdict,
            GradientTest::Converged,
            self.config.grad_tolerance,
            verdict == GradientTest::Converged && within_cap,
        ));
        Ok(outcome)
    }

    fn final_check(&mut self, outcome: &OptimOutcome) -> SelfCheckResult<()> {
        self.enter(Stage::FinalCheck);
        let expected = closed_form::expected_optimum(&self.model)?;
        for (i, (&got, &want)) in outcome.theta_hat.iter().zip(expected.iter()).enumerate() {
            self.report.push(Check::scalar(format!("point[{i}]"), got, want, self.config.tolerance));
        }
        if self.model.counts() == &FIXTURE_COUNTS[..] {
            self.report.push(Check::vector(
                "point (quoted optimum)",
                outcome.theta_hat.view(),
                ndarray::ArrayView1::from(&FIXTURE_OPTIMUM[..]),
                self.config.tolerance,
            ));
        }
        Ok(())
    }
}

/// Run the self-check on the fixture model.
pub fn run_selfcheck(config: HarnessConfig) -> SelfCheckResult<Report> {
    Harness::new(config)?.run()
}
