//! Batch aggregation: counts and failure details.

use crate::fetch::FetchOutcome;

/// Aggregate over all outcomes of one batch, built once after every
/// dispatched worker has completed.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FetchOutcome>,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: Vec<FetchOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of dispatched links (completion order preserved).
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Every failed outcome, with its link and message.
    pub fn failures(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    pub fn outcomes(&self) -> &[FetchOutcome] {
        &self.outcomes
    }
}
