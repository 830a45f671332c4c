//! maxent_unigram — maximum-entropy unigram fit with a built-in self-check.
//!
//! Purpose
//! -------
//! Fit softmax log-weights `w` to observed outcome counts by minimizing the
//! negative log-likelihood with L-BFGS, and verify the evaluators and the fit
//! against hand-derived closed forms.
//!
//! Key behaviors
//! -------------
//! - [`unigram`]: the count model, partition / NLL / gradient evaluators and
//!   the closed-form oracle.
//! - [`optimization`]: argmin-backed minimizer, softmax helpers and the
//!   optimizer error surface.
//! - [`verification`]: the self-check harness and its GOOD/BAD report.
//!
//! Conventions
//! -----------
//! - Weights and gradients are `ndarray::Array1<f64>`, one entry per count.
//! - Library code never prints; it logs through `log` and returns reports.
//!   The `maxent_selfcheck` binary owns stdout and the exit code.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use maxent_unigram::verification::{HarnessConfig, run_selfcheck};
//!
//! let report = run_selfcheck(HarnessConfig::default())?;
//! println!("{report}");
//! std::process::exit(i32::from(report.exit_code()));
//! # Ok::<(), maxent_unigram::verification::SelfCheckError>(())
//! ```

pub mod optimization;
pub mod unigram;
pub mod verification;
