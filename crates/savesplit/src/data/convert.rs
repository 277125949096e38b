use savesplit_core::ScheduleBuilder;
use savesplit_core::model::{BonusCategory, Eligibility};
use savesplit_core::registry::RateRegistry;

use super::DataError;
use super::registry_data::{AccountData, ConditionData, RegistryData};

/// Convert a YAML account table into a validated registry.
///
/// Accounts get ids in file order.
pub fn to_registry(data: &RegistryData) -> Result<RateRegistry, DataError> {
    let builders = data
        .accounts
        .iter()
        .map(to_builder)
        .collect::<Result<Vec<_>, _>>()?;
    RateRegistry::from_builders(builders).map_err(DataError::Invalid)
}

fn to_builder(account: &AccountData) -> Result<ScheduleBuilder, DataError> {
    let mut builder = ScheduleBuilder::new(&account.key, &account.name);

    for tier in &account.tiers {
        builder = builder.tier(tier.up_to, tier.rate, &tier.remark);
    }
    builder = match &account.overflow {
        Some(overflow) => builder.overflow_rate(overflow.rate, &overflow.remark),
        None => builder.overflow_last_rate(),
    };

    for bonus in &account.bonuses {
        let category =
            BonusCategory::parse(&bonus.category).ok_or_else(|| DataError::UnknownCategory {
                account: account.key.clone(),
                category: bonus.category.clone(),
            })?;
        let eligibility = bonus.when.as_ref().map_or(Eligibility::Always, to_eligibility);
        builder = builder.banded_bonus(
            category,
            &bonus.label,
            bonus.from,
            bonus.up_to,
            bonus.rate,
            eligibility,
        );
    }

    if let Some(cap) = account.max_cap {
        builder = builder.max_cap(cap);
    }
    if let Some(requires) = &account.requires {
        builder = builder.requires(to_eligibility(requires));
    }
    if account.accepts_salary_code {
        builder = builder.accepts_salary_code();
    }
    Ok(builder)
}

/// Every condition that is set must hold; an empty condition always holds
pub fn to_eligibility(condition: &ConditionData) -> Eligibility {
    let mut parts = Vec::new();

    if let Some(min_amount) = condition.min_salary {
        parts.push(Eligibility::Salary { min_amount });
    }
    if let Some(min) = condition.min_spend {
        parts.push(Eligibility::MinSpend(min));
    }
    if let Some(count) = condition.min_giro {
        parts.push(Eligibility::MinGiro(count));
    }
    if let Some(min_amount) = condition.insurance {
        parts.push(Eligibility::Insurance { min_amount });
    }
    if let Some(min_amount) = condition.investment {
        parts.push(Eligibility::Investment { min_amount });
    }
    if let Some(min_amount) = condition.home_loan {
        parts.push(Eligibility::HomeLoan { min_amount });
    }
    if condition.increased_balance {
        parts.push(Eligibility::IncreasedBalance);
    }
    if condition.grew_wealth {
        parts.push(Eligibility::GrewWealth);
    }
    if !condition.any.is_empty() {
        parts.push(Eligibility::Any(
            condition.any.iter().map(to_eligibility).collect(),
        ));
    }
    if let Some(not) = &condition.not {
        parts.push(Eligibility::Not(Box::new(to_eligibility(not))));
    }

    match parts.len() {
        0 => Eligibility::Always,
        1 => parts.remove(0),
        _ => Eligibility::All(parts),
    }
}
