//! Finding the best ways to split funds across accounts
//!
//! Every distribution the enumerator produces is scored and the best
//! `top_k` are kept. Runs can be bounded by a scenario count or a time
//! limit and cancelled from another thread; in every case the result holds
//! the best distributions found so far.
//!
//! # Example
//!
//! ```ignore
//! use savesplit_core::model::UserRequirements;
//! use savesplit_core::optimization::{OptimizationConfig, optimize};
//! use savesplit_core::registry::RateRegistry;
//!
//! let registry = RateRegistry::builtin()?;
//! let requirements = UserRequirements::with_salary(3_000.0);
//! let result = optimize(&registry, 100_000.0, &requirements, &OptimizationConfig::default(), None)?;
//! if let Some(best) = result.best() {
//!     println!("Best: ${:.2} per year", best.total_interest);
//! }
//! ```

mod config;
mod progress;
mod rank;
mod result;
mod search;

pub use config::OptimizationConfig;
pub use progress::{ProgressCallback, ProgressEvent, ProgressStatus, SearchProgress};
pub use rank::{TopKRanker, compare_scenarios};
pub use result::{OptimizationResult, TerminationReason};
pub use search::Search;

use crate::error::InputError;
use crate::model::UserRequirements;
use crate::registry::RateRegistry;

/// Main optimization entry point
///
/// Runs the search to completion (or to a configured limit) and returns the
/// best distributions, best first.
///
/// # Arguments
/// * `registry` - Accounts to distribute across
/// * `total_funds` - Amount to distribute; rounded down to the increment
/// * `requirements` - What the user does each month
/// * `config` - Increment, result count and limits
/// * `progress_callback` - Optional callback for progress updates
pub fn optimize(
    registry: &RateRegistry,
    total_funds: f64,
    requirements: &UserRequirements,
    config: &OptimizationConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<OptimizationResult, InputError> {
    let mut search = Search::new(registry, total_funds, requirements, config.clone())?;
    if let Some(callback) = progress_callback {
        search = search.with_callback(callback);
    }
    while search.step().is_some() {}
    Ok(search.finish())
}

/// Like [`optimize`], also publishing progress through shared counters.
///
/// Calling [`SearchProgress::cancel`] from another thread stops the run at
/// the next batch boundary.
pub fn optimize_with_progress(
    registry: &RateRegistry,
    total_funds: f64,
    requirements: &UserRequirements,
    config: &OptimizationConfig,
    progress: &SearchProgress,
    progress_callback: Option<ProgressCallback>,
) -> Result<OptimizationResult, InputError> {
    let mut search = Search::new(registry, total_funds, requirements, config.clone())?
        .with_progress(progress.clone());
    if let Some(callback) = progress_callback {
        search = search.with_callback(callback);
    }
    while search.step().is_some() {}
    Ok(search.finish())
}
