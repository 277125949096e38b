//! Distribution space invariants
//!
//! These tests verify:
//! - Every distribution allocates exactly the rounded-down total
//! - No account exceeds its cap and every amount is a whole increment
//! - The counted size matches what the iterator yields
//! - Passes are restartable and produce the same sequence
//! - The participation pre-check never drops an account that could take part
//! - Grids too fine to address are rejected up front

use rustc_hash::FxHashSet;

use crate::config::ScheduleBuilder;
use crate::enumerate::{DistributionSpace, MAX_UNITS};
use crate::error::InputError;
use crate::model::{AccountId, Distribution, Eligibility, UserRequirements};
use crate::registry::RateRegistry;

use super::flat;

fn registry() -> RateRegistry {
    RateRegistry::from_builders(vec![
        flat("a", 30_000.0, 0.01),
        flat("b", 50_000.0, 0.02),
        ScheduleBuilder::new("c", "c").tier(10_000.0, 0.015, ""),
        flat("d", 20_000.0, 0.03),
    ])
    .unwrap()
}

#[test]
fn test_every_distribution_respects_total_caps_and_increment() {
    let registry = registry();
    let space =
        DistributionSpace::new(&registry, 62_500.0, 5_000.0, &UserRequirements::default())
            .unwrap();
    assert_eq!(space.allocatable(), 60_000.0);

    let mut seen = 0;
    for dist in &space {
        seen += 1;
        assert!((dist.total() - 60_000.0).abs() < 1e-9);
        for allocation in dist.funded() {
            assert!(allocation.amount > 0.0);
            let units = allocation.amount / 5_000.0;
            assert_eq!(units, units.round());
            let schedule = registry.get(allocation.account_id).unwrap();
            if let Some(cap) = schedule.max_cap {
                assert!(allocation.amount <= cap);
            }
        }
    }
    assert!(seen > 0);
}

#[test]
fn test_count_matches_iteration() {
    let registry = registry();
    let req = UserRequirements::default();
    for total in [0.0, 5_000.0, 45_000.0, 100_000.0, 200_000.0] {
        let space = DistributionSpace::new(&registry, total, 5_000.0, &req).unwrap();
        assert_eq!(
            space.count(),
            Some(space.iter().count() as u64),
            "count mismatch for {total}"
        );
    }
}

#[test]
fn test_no_duplicates() {
    let registry = registry();
    let space =
        DistributionSpace::new(&registry, 60_000.0, 5_000.0, &UserRequirements::default())
            .unwrap();
    let keys: Vec<Vec<(AccountId, u64)>> = space
        .iter()
        .map(|d| {
            d.allocations
                .iter()
                .map(|a| (a.account_id, (a.amount / 5_000.0) as u64))
                .collect()
        })
        .collect();
    let unique: FxHashSet<_> = keys.iter().cloned().collect();
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn test_passes_are_restartable() {
    let registry = registry();
    let space =
        DistributionSpace::new(&registry, 40_000.0, 5_000.0, &UserRequirements::default())
            .unwrap();

    let mut partial = space.iter();
    let head: Vec<Distribution> = partial.by_ref().take(3).collect();
    drop(partial);

    let full: Vec<Distribution> = space.iter().collect();
    assert_eq!(&full[..3], head.as_slice());
    assert_eq!(full, space.iter().collect::<Vec<_>>());
}

#[test]
fn test_first_account_ascends_from_zero() {
    let registry = registry();
    let space =
        DistributionSpace::new(&registry, 10_000.0, 5_000.0, &UserRequirements::default())
            .unwrap();
    let first = space.iter().next().unwrap();
    assert_eq!(first.amount_for(AccountId(0)), 0.0);
    let last = space.iter().last().unwrap();
    assert_eq!(last.amount_for(AccountId(0)), 10_000.0);
}

#[test]
fn test_uncapped_account_takes_any_remainder() {
    let registry = registry();
    let space =
        DistributionSpace::new(&registry, 500_000.0, 5_000.0, &UserRequirements::default())
            .unwrap();
    assert!(space.is_feasible());
    assert!(space.iter().all(|d| d.amount_for(AccountId(2)) >= 400_000.0));
}

#[test]
fn test_account_gated_on_no_salary_still_participates() {
    let registry = RateRegistry::from_builders(vec![
        flat("salaried", 50_000.0, 0.02),
        flat("no-salary", 50_000.0, 0.01).requires(Eligibility::Not(Box::new(
            Eligibility::Salary { min_amount: 0.0 },
        ))),
    ])
    .unwrap();
    let req = UserRequirements::with_salary(3_000.0);

    let space = DistributionSpace::new(&registry, 50_000.0, 5_000.0, &req).unwrap();
    assert_eq!(space.accounts(), &[AccountId(0), AccountId(1)]);
    assert!(space.excluded().is_empty());
    assert!(space.iter().any(|d| d.amount_for(AccountId(1)) == 50_000.0));
}

#[test]
fn test_salary_gate_excludes_without_salary() {
    let registry = RateRegistry::from_builders(vec![
        flat("open", 20_000.0, 0.01),
        flat("salary-only", 20_000.0, 0.03).requires(Eligibility::Salary {
            min_amount: 1_000.0,
        }),
    ])
    .unwrap();

    let space =
        DistributionSpace::new(&registry, 20_000.0, 5_000.0, &UserRequirements::default())
            .unwrap();
    assert_eq!(space.excluded(), &[AccountId(1)]);
}

#[test]
fn test_too_fine_increment_is_rejected() {
    let open = ScheduleBuilder::new("open", "open").tier(1_000.0, 0.01, "");
    let registry = RateRegistry::from_builders(vec![open]).unwrap();
    let req = UserRequirements::default();

    assert!(matches!(
        DistributionSpace::new(&registry, 1e20, 1.0, &req),
        Err(InputError::IncrementTooFine { .. })
    ));

    let largest = MAX_UNITS as f64;
    let space = DistributionSpace::new(&registry, largest, 1.0, &req).unwrap();
    assert_eq!(space.allocatable(), largest);
    assert_eq!(space.iter().next().unwrap().total(), largest);
}
