//! Iteration trace observer.
//!
//! argmin's executor drops its state when a solver errors out mid-run. The
//! [`IterationTrace`] observer keeps a copy of every completed iterate in a
//! shared buffer so that an aborted run can still report the last point it
//! reached. Each iterate is also logged at `debug` level.
use std::sync::{Arc, Mutex};

use argmin::core::{ArgminError, Error, IterState, KV, State, observers::Observe};
use argmin_math::ArgminL2Norm;
use log::debug;

use crate::optimization::minimizer::{Grad, Theta};

/// Executor state type shared by every solver the minimizer runs.
pub type MinimizerState = IterState<Theta, Grad, (), (), (), f64>;

/// Snapshot of one completed iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterRecord {
    /// 1-based iteration number.
    pub step: usize,
    pub theta: Theta,
    pub cost: f64,
    pub grad_norm: Option<f64>,
}

/// Observer recording an [`IterRecord`] per iteration.
///
/// Cloning shares the underlying buffer: hand one clone to the executor and
/// read the records back through another.
#[derive(Debug, Clone, Default)]
pub struct IterationTrace {
    records: Arc<Mutex<Vec<IterRecord>>>,
}

impl IterationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the records collected so far.
    pub fn records(&self) -> Vec<IterRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Observe<MinimizerState> for IterationTrace {
    fn observe_iter(&mut self, state: &MinimizerState, _kv: &KV) -> Result<(), Error> {
        let mut records = self.records.lock().map_err(|_| ArgminError::PotentialBug {
            text: "iteration trace lock poisoned".to_string(),
        })?;
        let Some(theta) = state.get_param() else {
            return Ok(());
        };
        let record = IterRecord {
            step: records.len() + 1,
            theta: theta.clone(),
            cost: state.get_cost(),
            grad_norm: state.get_gradient().map(|g| g.l2_norm()),
        };
        debug!(
            "iter {:>3}: w = {:.10}, f = {:.10}, |g| = {:?}",
            record.step, record.theta, record.cost, record.grad_norm
        );
        records.push(record);
        Ok(())
    }
}
