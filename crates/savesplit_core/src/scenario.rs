//! Scoring one complete distribution

use crate::error::ConfigurationError;
use crate::model::{AccountResult, Distribution, ScenarioResult, UserRequirements, round_cents};
use crate::registry::RateRegistry;
use crate::salary::select_salary_account;
use crate::tiers::evaluate_interest;

/// Evaluate a distribution into a [`ScenarioResult`].
///
/// The salary account is resolved once, then each funded account is
/// evaluated with its resolved salary flag. `index` is the position of the
/// distribution in enumeration order and is carried through for ranking.
///
/// The scenario total is the sum of the per-account totals as reported, so
/// the two always agree to the cent.
pub fn evaluate_scenario(
    registry: &RateRegistry,
    distribution: &Distribution,
    requirements: &UserRequirements,
    index: u64,
) -> Result<ScenarioResult, ConfigurationError> {
    let salary_account = select_salary_account(registry, distribution, requirements)?;

    let mut accounts = Vec::with_capacity(distribution.allocations.len());
    for allocation in distribution.funded() {
        let schedule = registry.get(allocation.account_id)?;
        let is_salary_bank = salary_account == Some(schedule.id);
        let interest = evaluate_interest(schedule, allocation.amount, requirements, is_salary_bank)?;

        accounts.push(AccountResult {
            account_id: schedule.id,
            key: schedule.key.clone(),
            name: schedule.name.clone(),
            amount: allocation.amount,
            total_interest: interest.total_interest,
            effective_rate: interest.effective_rate,
            is_salary_bank,
            breakdown: interest.breakdown,
        });
    }

    let total_interest = round_cents(accounts.iter().map(|a| a.total_interest).sum());
    let allocated = distribution.total();
    let effective_rate = if allocated > 0.0 {
        total_interest / allocated
    } else {
        0.0
    };

    Ok(ScenarioResult {
        index,
        distribution: distribution.clone(),
        accounts,
        total_interest,
        effective_rate,
        monthly_interest: round_cents(total_interest / 12.0),
        salary_account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleBuilder;
    use crate::model::AccountId;

    #[test]
    fn test_empty_distribution_scores_zero() {
        let registry = RateRegistry::from_builders(vec![
            ScheduleBuilder::new("a", "A").tier(10_000.0, 0.01, ""),
        ])
        .unwrap();
        let result = evaluate_scenario(
            &registry,
            &Distribution::default(),
            &UserRequirements::default(),
            0,
        )
        .unwrap();
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.effective_rate, 0.0);
        assert!(result.accounts.is_empty());
        assert_eq!(result.salary_account, None);
    }

    #[test]
    fn test_unknown_account_drops_the_scenario() {
        let registry = RateRegistry::from_builders(vec![
            ScheduleBuilder::new("a", "A").tier(10_000.0, 0.01, ""),
        ])
        .unwrap();
        let dist = Distribution::from_pairs([(AccountId(0), 5_000.0), (AccountId(4), 5_000.0)]);
        let err = evaluate_scenario(&registry, &dist, &UserRequirements::default(), 0);
        assert_eq!(err, Err(ConfigurationError::UnknownAccount(AccountId(4))));
    }

    #[test]
    fn test_monthly_and_effective_rate() {
        let registry = RateRegistry::from_builders(vec![
            ScheduleBuilder::new("a", "A").tier(100_000.0, 0.024, ""),
        ])
        .unwrap();
        let dist = Distribution::from_pairs([(AccountId(0), 50_000.0)]);
        let result = evaluate_scenario(&registry, &dist, &UserRequirements::default(), 7).unwrap();
        assert_eq!(result.index, 7);
        assert!((result.total_interest - 1_200.0).abs() < 1e-9);
        assert!((result.monthly_interest - 100.0).abs() < 1e-9);
        assert!((result.effective_rate - 0.024).abs() < 1e-12);
    }
}
