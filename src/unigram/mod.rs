//! unigram — softmax unigram model, its NLL objective, and reference values.
//!
//! Purpose
//! -------
//! Hold the maximum-entropy unigram model: observed counts, the negative
//! log-likelihood of those counts under `softmax(w)` together with its
//! gradient, and the closed-form values the self-check compares against.
//!
//! Key behaviors
//! -------------
//! - [`model`]: immutable [`UnigramModel`] (counts + derived total) and the
//!   `[2, 1]` fixture.
//! - [`objective`]: partition, NLL, gradient, combined evaluator and the
//!   [`UnigramObjective`] bridge into the optimizer's `Objective` trait.
//! - [`closed_form`]: independently written reference formulas, including
//!   the derived zero-sum optimum.
//! - [`errors`]: [`MaxEntError`] and the [`MaxEntResult`] alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Weight, gradient and count sequences share one length; evaluators
//!   check it and return errors instead of panicking.
//! - Evaluators are pure: no caching, no hidden state, identical output for
//!   identical input.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule; the end-to-end fit is covered by
//!   `verification` and `tests/integration_selfcheck.rs`.

pub mod closed_form;
pub mod errors;
pub mod model;
pub mod objective;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{MaxEntError, MaxEntResult};
pub use self::model::UnigramModel;
pub use self::objective::UnigramObjective;
