//! Batch-driven search over the distribution space
//!
//! A [`Search`] is advanced one batch at a time with [`Search::step`]. Each
//! batch is scored (in parallel when the `parallel` feature is on), merged
//! into the ranker in enumeration order, and reported as a progress event.
//! Limits and cancellation are checked between batches, so a stopped search
//! always holds a consistent best-so-far answer.

use std::iter::Peekable;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::enumerate::{DistributionSpace, Distributions};
use crate::error::{ConfigurationError, InputError};
use crate::model::{AccountId, Distribution, ScenarioResult, UserRequirements};
use crate::registry::RateRegistry;
use crate::scenario::evaluate_scenario;

use super::config::OptimizationConfig;
use super::progress::{ProgressCallback, ProgressEvent, ProgressStatus, SearchProgress};
use super::rank::TopKRanker;
use super::result::{OptimizationResult, TerminationReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Running,
    Finished(TerminationReason),
}

/// An optimization run that the caller drives
pub struct Search<'a> {
    registry: &'a RateRegistry,
    requirements: &'a UserRequirements,
    config: OptimizationConfig,
    distributions: Peekable<Distributions>,
    feasible: bool,
    allocated_total: f64,
    excluded: Vec<AccountId>,
    total: Option<u64>,
    ranker: TopKRanker,
    processed: u64,
    skipped: u64,
    started_at: Instant,
    progress: Option<SearchProgress>,
    callback: Option<ProgressCallback>,
    phase: Phase,
}

impl<'a> Search<'a> {
    pub fn new(
        registry: &'a RateRegistry,
        total_funds: f64,
        requirements: &'a UserRequirements,
        config: OptimizationConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        let space = DistributionSpace::new(registry, total_funds, config.increment, requirements)?;
        let total = space.count();

        tracing::debug!(
            accounts = space.accounts().len(),
            excluded = space.excluded().len(),
            allocatable = space.allocatable(),
            scenarios = ?total,
            "search prepared"
        );

        Ok(Self {
            registry,
            requirements,
            ranker: TopKRanker::new(config.top_k),
            config,
            distributions: space.iter().peekable(),
            feasible: space.is_feasible(),
            allocated_total: space.allocatable(),
            excluded: space.excluded().to_vec(),
            total,
            processed: 0,
            skipped: 0,
            started_at: Instant::now(),
            progress: None,
            callback: None,
            phase: Phase::Pending,
        })
    }

    /// Report progress through shared counters and honour their cancel flag
    #[must_use]
    pub fn with_progress(mut self, progress: SearchProgress) -> Self {
        progress.reset(self.total);
        self.progress = Some(progress);
        self
    }

    /// Invoke `callback` for every event `step` produces
    #[must_use]
    pub fn with_callback(mut self, callback: ProgressCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Size of the search space when it could be counted
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Best results so far, best first
    #[must_use]
    pub fn top(&self) -> &[ScenarioResult] {
        self.ranker.results()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Advance the search.
    ///
    /// The first call reports `Started`, each following call scores one batch
    /// and reports `Running`, and the call that stops the search reports the
    /// final status. After that, `None`.
    pub fn step(&mut self) -> Option<ProgressEvent> {
        let status = match self.phase {
            Phase::Finished(_) => return None,
            Phase::Pending => {
                self.started_at = Instant::now();
                self.phase = Phase::Running;
                ProgressStatus::Started
            }
            Phase::Running => match self.stop_reason() {
                Some(reason) => self.stop(reason),
                None => self.run_batch(),
            },
        };

        let event = ProgressEvent::new(status, self.processed, self.total);
        if let Some(callback) = &self.callback {
            callback(&event);
        }
        Some(event)
    }

    /// Finish the run and collect the result.
    ///
    /// A search that has not run to a stop is reported as cancelled.
    #[must_use]
    pub fn finish(self) -> OptimizationResult {
        let termination_reason = match self.phase {
            Phase::Finished(reason) => reason,
            Phase::Pending | Phase::Running => TerminationReason::Cancelled,
        };

        tracing::debug!(
            ?termination_reason,
            processed = self.processed,
            skipped = self.skipped,
            "search finished"
        );

        OptimizationResult {
            results: self.ranker.into_results(),
            termination_reason,
            scenarios_total: self.total,
            scenarios_processed: self.processed,
            scenarios_skipped: self.skipped,
            allocated_total: self.allocated_total,
            excluded_accounts: self.excluded,
        }
    }

    fn stop_reason(&mut self) -> Option<TerminationReason> {
        if self.progress.as_ref().is_some_and(SearchProgress::is_cancelled) {
            return Some(TerminationReason::Cancelled);
        }
        if let Some(limit) = self.config.time_limit_ms
            && self.started_at.elapsed() >= Duration::from_millis(limit)
        {
            return Some(TerminationReason::TimeLimitReached);
        }
        if self.distributions.peek().is_none() {
            return Some(if self.feasible {
                TerminationReason::Exhausted
            } else {
                TerminationReason::NoFeasibleDistribution
            });
        }
        if let Some(max) = self.config.max_scenarios
            && self.processed >= max
        {
            return Some(TerminationReason::ScenarioLimitReached);
        }
        None
    }

    fn stop(&mut self, reason: TerminationReason) -> ProgressStatus {
        if reason == TerminationReason::NoFeasibleDistribution {
            tracing::warn!(
                allocatable = self.allocated_total,
                "funds exceed the combined caps of the eligible accounts"
            );
        }
        self.phase = Phase::Finished(reason);
        match reason {
            TerminationReason::Exhausted | TerminationReason::NoFeasibleDistribution => {
                ProgressStatus::Completed
            }
            TerminationReason::ScenarioLimitReached | TerminationReason::TimeLimitReached => {
                ProgressStatus::LimitReached
            }
            TerminationReason::Cancelled => ProgressStatus::Cancelled,
        }
    }

    fn run_batch(&mut self) -> ProgressStatus {
        let mut budget = self.config.batch_size as u64;
        if let Some(max) = self.config.max_scenarios {
            budget = budget.min(max.saturating_sub(self.processed));
        }

        let start = self.processed;
        let batch: Vec<(u64, Distribution)> = (start..)
            .zip(self.distributions.by_ref().take(budget as usize))
            .collect();

        let scored = evaluate_batch(self.registry, self.requirements, &batch);
        for ((index, _), outcome) in batch.iter().zip(scored) {
            match outcome {
                Ok(result) => {
                    self.ranker.offer(result);
                }
                Err(err) => {
                    tracing::warn!(scenario = index, error = %err, "skipping scenario");
                    self.skipped += 1;
                }
            }
        }

        let examined = batch.len() as u64;
        self.processed += examined;
        if let Some(progress) = &self.progress {
            progress.advance(examined);
        }
        ProgressStatus::Running
    }
}

type Scored = Vec<Result<ScenarioResult, ConfigurationError>>;

/// Score a batch, keeping the input order
fn evaluate_batch(
    registry: &RateRegistry,
    requirements: &UserRequirements,
    batch: &[(u64, Distribution)],
) -> Scored {
    #[cfg(feature = "parallel")]
    {
        evaluate_batch_parallel(registry, requirements, batch)
    }

    #[cfg(not(feature = "parallel"))]
    {
        evaluate_batch_sequential(registry, requirements, batch)
    }
}

#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
fn evaluate_batch_sequential(
    registry: &RateRegistry,
    requirements: &UserRequirements,
    batch: &[(u64, Distribution)],
) -> Scored {
    batch
        .iter()
        .map(|(index, distribution)| {
            evaluate_scenario(registry, distribution, requirements, *index)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn evaluate_batch_parallel(
    registry: &RateRegistry,
    requirements: &UserRequirements,
    batch: &[(u64, Distribution)],
) -> Scored {
    batch
        .par_iter()
        .map(|(index, distribution)| {
            evaluate_scenario(registry, distribution, requirements, *index)
        })
        .collect()
}
