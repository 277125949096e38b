//! Integration tests for the savesplit engine
//!
//! Tests are organized by topic:
//! - `worked_examples` - Hand-computed interest figures end to end
//! - `tier_properties` - Invariants of the tier evaluator
//! - `salary_assignment` - Which account receives the salary credit
//! - `enumeration` - Distribution space invariants and counting
//! - `search` - Ranking, limits, cancellation and progress
//! - `builtin` - The built-in account table

mod enumeration;
mod tier_properties;

use crate::config::ScheduleBuilder;
use crate::model::Eligibility;

/// A plain account paying `rate` up to `cap` and capped there
fn flat(key: &str, cap: f64, rate: f64) -> ScheduleBuilder {
    ScheduleBuilder::new(key, key)
        .tier(cap, rate, "")
        .max_cap(cap)
}

fn salary_and_spend(min_salary: f64, min_spend: f64) -> Eligibility {
    Eligibility::All(vec![
        Eligibility::Salary {
            min_amount: min_salary,
        },
        Eligibility::MinSpend(min_spend),
    ])
}
