//! Unigram count model: the observed counts and their total.
//!
//! [`UnigramModel`] is the only "training data" in the crate. It is an
//! immutable value object: counts are fixed at construction and the total is
//! always recomputed from them, never supplied independently. Evaluators in
//! [`objective`](crate::unigram::objective) borrow it read-only.
use crate::unigram::errors::{MaxEntError, MaxEntResult};

/// Counts of the fixture model used by the self-check.
pub const FIXTURE_COUNTS: [u32; 2] = [2, 1];

/// Observed outcome counts plus their derived total.
///
/// Invariants
/// ----------
/// - `counts` is non-empty.
/// - `total == counts.iter().sum()` and `total > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnigramModel {
    counts: Vec<u32>,
    total: u64,
}

impl UnigramModel {
    /// Build a model from raw counts, deriving the total.
    ///
    /// # Errors
    /// - [`MaxEntError::EmptyCounts`] if `counts` is empty.
    /// - [`MaxEntError::ZeroTotalCount`] if every count is zero.
    pub fn new(counts: Vec<u32>) -> MaxEntResult<Self> {
        if counts.is_empty() {
            return Err(MaxEntError::EmptyCounts);
        }
        let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        if total == 0 {
            return Err(MaxEntError::ZeroTotalCount);
        }
        Ok(Self { counts, total })
    }

    /// The fixed model `{counts = [2, 1], total = 3}`.
    pub fn fixture() -> Self {
        let counts = FIXTURE_COUNTS.to_vec();
        let total = counts.iter().map(|&c| u64::from(c)).sum();
        Self { counts, total }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of outcomes, i.e. the required weight-vector length.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count at `index` as `f64`, for use inside the evaluators.
    pub(crate) fn count_f64(&self, index: usize) -> f64 {
        f64::from(self.counts[index])
    }

    pub(crate) fn total_f64(&self) -> f64 {
        self.total as f64
    }
}
