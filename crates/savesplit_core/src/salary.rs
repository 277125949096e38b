//! Salary assignment
//!
//! A salary can only be credited to one account, so within a scenario at
//! most one account is evaluated as the salary bank. The selector gives the
//! flag to the funded account whose interest rises the most because of it.

use crate::error::ConfigurationError;
use crate::model::{AccountId, AccountRateSchedule, Distribution, UserRequirements};
use crate::registry::RateRegistry;
use crate::tiers::evaluate_interest;

/// Benefits closer than this are treated as equal
const BENEFIT_TOLERANCE: f64 = 1e-9;

/// Interest gained by crediting the salary to this account
pub fn marginal_benefit(
    schedule: &AccountRateSchedule,
    amount: f64,
    requirements: &UserRequirements,
) -> Result<f64, ConfigurationError> {
    let could_pay = schedule.can_receive_salary(requirements)
        && schedule
            .bonus_tiers
            .iter()
            .any(|b| b.eligibility.mentions_salary());
    if !could_pay || amount <= 0.0 {
        return Ok(0.0);
    }

    let with = evaluate_interest(schedule, amount, requirements, true)?;
    let without = evaluate_interest(schedule, amount, requirements, false)?;
    Ok(with.raw_interest - without.raw_interest)
}

/// Choose the account that receives the salary credit in `distribution`.
///
/// The funded account with the strictly greatest positive benefit wins; on
/// a tie the earlier account in registry order keeps it. When no account
/// benefits, a user with a salary-equivalent transaction code still
/// nominates the first funded account that accepts the code.
pub fn select_salary_account(
    registry: &RateRegistry,
    distribution: &Distribution,
    requirements: &UserRequirements,
) -> Result<Option<AccountId>, ConfigurationError> {
    if !requirements.wants_salary_assignment() {
        return Ok(None);
    }

    let mut funded = Vec::with_capacity(distribution.allocations.len());
    for allocation in distribution.funded() {
        let position = registry
            .position(allocation.account_id)
            .ok_or(ConfigurationError::UnknownAccount(allocation.account_id))?;
        funded.push((position, allocation));
    }
    funded.sort_by_key(|&(position, _)| position);

    let mut best: Option<(AccountId, f64)> = None;
    let mut fallback = None;

    for (_, allocation) in funded {
        let schedule = registry.get(allocation.account_id)?;
        if fallback.is_none() && requirements.salary_code && schedule.accepts_salary_code {
            fallback = Some(schedule.id);
        }

        let benefit = marginal_benefit(schedule, allocation.amount, requirements)?;
        if benefit > BENEFIT_TOLERANCE
            && best.is_none_or(|(_, current)| benefit > current + BENEFIT_TOLERANCE)
        {
            best = Some((schedule.id, benefit));
        }
    }

    Ok(best.map(|(id, _)| id).or(fallback))
}
