//! Bounded top-K accumulator

use std::cmp::Ordering;

use crate::model::ScenarioResult;

/// Ranking order: higher total interest first, then earlier enumeration
#[must_use]
pub fn compare_scenarios(a: &ScenarioResult, b: &ScenarioResult) -> Ordering {
    b.total_interest
        .total_cmp(&a.total_interest)
        .then_with(|| a.index.cmp(&b.index))
}

/// Keeps the best `k` scenarios seen so far.
///
/// Holds at most `k` results and is sorted after every offer, so it can be
/// read at any point as a consistent partial answer.
#[derive(Debug, Clone)]
pub struct TopKRanker {
    k: usize,
    best: Vec<ScenarioResult>,
}

impl TopKRanker {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            best: Vec::with_capacity(k + 1),
        }
    }

    /// Offer a candidate; returns whether it was kept
    pub fn offer(&mut self, candidate: ScenarioResult) -> bool {
        if self.k == 0 {
            return false;
        }
        let position = self
            .best
            .iter()
            .position(|held| compare_scenarios(&candidate, held) == Ordering::Less);

        match position {
            Some(at) => {
                self.best.insert(at, candidate);
                self.best.truncate(self.k);
                true
            }
            None if self.best.len() < self.k => {
                self.best.push(candidate);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[ScenarioResult] {
        &self.best
    }

    #[must_use]
    pub fn into_results(self) -> Vec<ScenarioResult> {
        self.best
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}
