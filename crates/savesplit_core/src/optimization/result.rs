//! Optimization result types

use serde::{Deserialize, Serialize};

use crate::model::{AccountId, ScenarioResult};

/// Reason why the search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Every distribution was examined
    Exhausted,

    /// The caller's scenario cap was reached
    ScenarioLimitReached,

    /// The caller's wall-clock limit was reached
    TimeLimitReached,

    /// The caller cancelled or abandoned the search
    Cancelled,

    /// The funds cannot be placed within the eligible accounts' caps
    NoFeasibleDistribution,
}

impl TerminationReason {
    /// Whether the results cover the whole search space
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            TerminationReason::Exhausted | TerminationReason::NoFeasibleDistribution
        )
    }
}

/// Final result from an optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best distributions, best first
    pub results: Vec<ScenarioResult>,

    pub termination_reason: TerminationReason,

    /// Size of the search space when it could be counted
    pub scenarios_total: Option<u64>,

    /// Scenarios examined, including skipped ones
    pub scenarios_processed: u64,

    /// Scenarios dropped because of a configuration error
    pub scenarios_skipped: u64,

    /// Amount every distribution allocates
    pub allocated_total: f64,

    /// Accounts left out by the participation pre-check
    pub excluded_accounts: Vec<AccountId>,
}

impl OptimizationResult {
    #[must_use]
    pub fn best(&self) -> Option<&ScenarioResult> {
        self.results.first()
    }
}
