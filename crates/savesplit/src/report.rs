//! Rendering optimization results for the terminal

use std::fmt;

use clap::ValueEnum;
use savesplit_core::model::{ScenarioResult, TierKind};
use savesplit_core::optimization::{OptimizationResult, TerminationReason};

use crate::util::format::{format_currency, format_currency_short, format_percentage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn describe(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::Exhausted => "all scenarios examined",
        TerminationReason::ScenarioLimitReached => "stopped at the scenario limit",
        TerminationReason::TimeLimitReached => "stopped at the time limit",
        TerminationReason::Cancelled => "cancelled",
        TerminationReason::NoFeasibleDistribution => {
            "the amount does not fit within the eligible accounts' caps"
        }
    }
}

/// Plain-text ranking of the best distributions
pub struct TableReport<'a> {
    pub result: &'a OptimizationResult,
    /// Also list the per-tier breakdown of every account
    pub verbose: bool,
}

impl TableReport<'_> {
    fn scenario(
        &self,
        f: &mut fmt::Formatter<'_>,
        rank: usize,
        scenario: &ScenarioResult,
    ) -> fmt::Result {
        writeln!(
            f,
            "#{rank}  {} per year ({} per month), effective {}",
            format_currency(scenario.total_interest),
            format_currency(scenario.monthly_interest),
            format_percentage(scenario.effective_rate),
        )?;
        if let Some(salary) = scenario.salary_bank() {
            writeln!(f, "    salary credited to {}", salary.name)?;
        }

        for account in &scenario.accounts {
            let salary = if account.is_salary_bank { "  [salary]" } else { "" };
            writeln!(
                f,
                "    {:<32} {:>12} {:>12} {:>8}{salary}",
                account.name,
                format_currency_short(account.amount),
                format_currency(account.total_interest),
                format_percentage(account.effective_rate),
            )?;

            if self.verbose {
                for line in &account.breakdown {
                    let kind = match line.kind {
                        TierKind::Base => "base".to_string(),
                        TierKind::Overflow => "overflow".to_string(),
                        TierKind::Bonus(category) => format!("bonus:{category}"),
                    };
                    writeln!(
                        f,
                        "        {:<14} {:<34} {:>12} @ {:>7} = {}",
                        kind,
                        line.label,
                        format_currency_short(line.amount_in_tier),
                        format_percentage(line.rate),
                        format_currency(line.interest),
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for TableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let total = result
            .scenarios_total
            .map_or_else(|| "?".to_string(), |t| t.to_string());

        writeln!(
            f,
            "Allocating {} in {}/{} scenarios ({})",
            format_currency_short(result.allocated_total),
            result.scenarios_processed,
            total,
            describe(result.termination_reason),
        )?;
        if result.scenarios_skipped > 0 {
            writeln!(
                f,
                "{} scenarios skipped because of account table errors (see log)",
                result.scenarios_skipped
            )?;
        }
        if !result.excluded_accounts.is_empty() {
            writeln!(
                f,
                "{} account(s) left out: requirements not met",
                result.excluded_accounts.len()
            )?;
        }

        if result.results.is_empty() {
            return writeln!(f, "No distribution found.");
        }
        if !result.termination_reason.is_complete() {
            writeln!(f, "Best so far; not every distribution was examined.")?;
        }
        for (i, scenario) in result.results.iter().enumerate() {
            writeln!(f)?;
            self.scenario(f, i + 1, scenario)?;
        }
        Ok(())
    }
}

/// Render `result` in the requested format
pub fn render(
    result: &OptimizationResult,
    format: OutputFormat,
    verbose: bool,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(TableReport { result, verbose }.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savesplit_core::model::UserRequirements;
    use savesplit_core::optimization::{OptimizationConfig, optimize};
    use savesplit_core::registry::RateRegistry;

    fn sample() -> OptimizationResult {
        let registry = RateRegistry::builtin().unwrap();
        let config = OptimizationConfig {
            increment: 50_000.0,
            top_k: 2,
            ..Default::default()
        };
        optimize(
            &registry,
            100_000.0,
            &UserRequirements::with_salary(3_000.0),
            &config,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_table_lists_ranked_scenarios() {
        let result = sample();
        let table = render(&result, OutputFormat::Table, false).unwrap();
        assert!(table.starts_with("Allocating $100,000 in"));
        assert!(table.contains("#1  "));
        assert!(table.contains("#2  "));
        assert!(!table.contains("bonus:"));
    }

    #[test]
    fn test_verbose_table_shows_tiers() {
        let table = render(&sample(), OutputFormat::Table, true).unwrap();
        assert!(table.contains("base"));
    }

    #[test]
    fn test_json_is_machine_readable() {
        let result = sample();
        let json = render(&result, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["termination_reason"], "Exhausted");
    }

    #[test]
    fn test_salary_account_is_named() {
        let table = render(&sample(), OutputFormat::Table, false).unwrap();
        assert!(table.contains("salary credited to "));
        assert!(table.contains("[salary]"));
        assert!(!table.contains("Best so far"));
    }

    #[test]
    fn test_partial_search_is_flagged() {
        let registry = RateRegistry::builtin().unwrap();
        let config = OptimizationConfig {
            increment: 50_000.0,
            batch_size: 1,
            max_scenarios: Some(1),
            ..Default::default()
        };
        let result = optimize(
            &registry,
            100_000.0,
            &UserRequirements::default(),
            &config,
            None,
        )
        .unwrap();
        assert_eq!(
            result.termination_reason,
            TerminationReason::ScenarioLimitReached
        );
        let table = render(&result, OutputFormat::Table, false).unwrap();
        assert!(table.contains("stopped at the scenario limit"));
        assert!(table.contains("Best so far; not every distribution was examined."));
    }

    #[test]
    fn test_empty_result() {
        let result = OptimizationResult {
            results: vec![],
            termination_reason: TerminationReason::NoFeasibleDistribution,
            scenarios_total: Some(0),
            scenarios_processed: 0,
            scenarios_skipped: 0,
            allocated_total: 900_000.0,
            excluded_accounts: vec![],
        };
        let table = render(&result, OutputFormat::Table, false).unwrap();
        assert!(table.contains("No distribution found."));
        assert!(table.contains("caps"));
    }
}
