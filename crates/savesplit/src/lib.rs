//! Command-line host for the savesplit engine
//!
//! Loads the account table and the user profile, runs the optimizer and
//! renders the ranked distributions.

pub mod cli;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use savesplit_core::optimization::{ProgressCallback, ProgressEvent, ProgressStatus, optimize};

pub use cli::Args;
pub use logging::init_logging;

/// Default data directory: `~/.savesplit`
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".savesplit")
}

fn progress_logger() -> ProgressCallback {
    Box::new(|event: &ProgressEvent| match event.status {
        ProgressStatus::Running => tracing::debug!(
            current = event.current_scenario,
            percent = event.percent_complete,
            "search progress"
        ),
        status => tracing::info!(
            %status,
            current = event.current_scenario,
            total = ?event.total_scenarios,
            "search status changed"
        ),
    })
}

/// Run one optimization and return the rendered report
pub fn run(args: &Args) -> color_eyre::Result<String> {
    let profile = data::load_profile(args.profile.as_deref())?;
    let registry = data::load_registry(args.registry.as_deref())?;
    let requirements = args.requirements(profile.requirements);
    let config = args.optimization_config(profile.optimization);

    tracing::info!(
        amount = args.amount,
        increment = config.increment,
        top_k = config.top_k,
        accounts = registry.len(),
        "starting optimization"
    );

    let result = optimize(
        &registry,
        args.amount,
        &requirements,
        &config,
        Some(progress_logger()),
    )?;

    if let Some(best) = result.best() {
        tracing::info!(
            total_interest = best.total_interest,
            termination = ?result.termination_reason,
            "best distribution found"
        );
    }

    Ok(report::render(&result, args.format, args.verbose)?)
}
