//! Invariants of the tier evaluator
//!
//! These tests verify:
//! - Base and overflow lines always account for the whole deposit
//! - Interest never decreases as the deposit grows
//! - Evaluation is deterministic
//! - Malformed schedules are rejected instead of evaluated

use crate::config::ScheduleBuilder;
use crate::error::ConfigurationError;
use crate::model::{
    AccountId, AccountRateSchedule, BaseTier, BonusCategory, Eligibility, UserRequirements,
};
use crate::tiers::evaluate_interest;

fn stepped() -> AccountRateSchedule {
    ScheduleBuilder::new("stepped", "Stepped")
        .tier(10_000.0, 0.01, "")
        .tier(30_000.0, 0.02, "")
        .tier(60_000.0, 0.015, "")
        .overflow_rate(0.001, "")
        .bonus(
            BonusCategory::Spend,
            "Spend",
            40_000.0,
            0.005,
            Eligibility::MinSpend(500.0),
        )
        .build(AccountId(0))
}

const AMOUNTS: [f64; 8] = [
    1.0, 5_000.0, 10_000.0, 10_000.01, 29_999.99, 45_000.0, 60_000.0, 250_000.0,
];

#[test]
fn test_base_lines_cover_the_deposit() {
    let schedule = stepped();
    let req = UserRequirements::default();
    for amount in AMOUNTS {
        let result = evaluate_interest(&schedule, amount, &req, false).unwrap();
        let covered: f64 = result
            .breakdown
            .iter()
            .filter(|l| !matches!(l.kind, crate::model::TierKind::Bonus(_)))
            .map(|l| l.amount_in_tier)
            .sum();
        assert!(
            (covered - amount).abs() < 1e-6,
            "base lines cover {covered} of {amount}"
        );
    }
}

#[test]
fn test_interest_grows_with_the_deposit() {
    let schedule = stepped();
    let req = UserRequirements {
        spend_amount: 600.0,
        ..Default::default()
    };
    let mut previous = 0.0;
    for amount in AMOUNTS {
        let result = evaluate_interest(&schedule, amount, &req, false).unwrap();
        assert!(result.raw_interest >= previous);
        previous = result.raw_interest;
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let schedule = stepped();
    let req = UserRequirements {
        spend_amount: 600.0,
        ..Default::default()
    };
    let first = evaluate_interest(&schedule, 45_000.0, &req, false).unwrap();
    let second = evaluate_interest(&schedule, 45_000.0, &req, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bonus_stacks_on_top_of_base() {
    let schedule = stepped();
    let without = evaluate_interest(&schedule, 45_000.0, &UserRequirements::default(), false)
        .unwrap();
    let with = evaluate_interest(
        &schedule,
        45_000.0,
        &UserRequirements {
            spend_amount: 600.0,
            ..Default::default()
        },
        false,
    )
    .unwrap();
    // bonus pays 0.5% on the first 40K
    assert!((with.raw_interest - without.raw_interest - 200.0).abs() < 1e-6);
}

#[test]
fn test_rounding_happens_once_per_account() {
    let schedule = ScheduleBuilder::new("odd", "Odd")
        .tier(1_000.0, 0.00333, "")
        .tier(2_000.0, 0.00333, "")
        .tier(3_000.0, 0.00333, "")
        .build(AccountId(0));
    let result =
        evaluate_interest(&schedule, 3_000.0, &UserRequirements::default(), false).unwrap();
    // each line rounds to 3.33, the account total is 9.99 rounded once
    assert_eq!(result.total_interest, 9.99);
    assert!((result.raw_interest - 9.99).abs() < 1e-9);
}

#[test]
fn test_non_monotonic_tiers_are_rejected() {
    let mut schedule = stepped();
    schedule.base_tiers.insert(
        2,
        BaseTier {
            up_to: 20_000.0,
            rate: 0.01,
            remark: String::new(),
        },
    );
    assert!(matches!(
        evaluate_interest(&schedule, 45_000.0, &UserRequirements::default(), false),
        Err(ConfigurationError::NonMonotonicTiers { .. })
    ));
}

#[test]
fn test_negative_amount_is_rejected() {
    assert!(matches!(
        evaluate_interest(&stepped(), -5.0, &UserRequirements::default(), false),
        Err(ConfigurationError::InvalidAmount { .. })
    ));
}
