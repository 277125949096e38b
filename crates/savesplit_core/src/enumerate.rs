//! Distribution enumeration
//!
//! Generates every way to split the funds across accounts in fixed
//! increments. Work is done in whole increment units so sums are exact.
//!
//! Order is fixed: accounts in registry order, and for each account the
//! allocation ascends from zero. The search is a depth-first backtrack over
//! an explicit stack; each frame owns its own snapshot of the allocations
//! made so far, so no frame ever has to undo another's work.
//!
//! Accounts that fail their participation pre-check never enter the search,
//! and branches that cannot place the remaining funds are bounded away up
//! front. Neither changes which distributions are produced or their order.

use crate::error::{InputError, check_amount};
use crate::model::{AccountId, Allocation, Distribution, UserRequirements};
use crate::registry::RateRegistry;

/// Increment used when the caller does not pick one
pub const DEFAULT_INCREMENT: f64 = 5_000.0;

/// Above this many units the exact count is not computed
const MAX_COUNTED_UNITS: u64 = 1_000_000;

/// Most increment units a run may split the funds into
pub const MAX_UNITS: u64 = 1 << 40;

/// Absorbs representation error when dividing funds by the increment
const UNIT_EPSILON: f64 = 1e-9;

/// The finite set of distributions for one run
#[derive(Debug, Clone)]
pub struct DistributionSpace {
    accounts: Vec<AccountId>,
    /// Per-account cap in units
    caps: Vec<u64>,
    /// `suffix_caps[i]` is the most the accounts from `i` onwards can hold
    suffix_caps: Vec<u64>,
    units: u64,
    increment: f64,
    excluded: Vec<AccountId>,
}

impl DistributionSpace {
    pub fn new(
        registry: &RateRegistry,
        total_funds: f64,
        increment: f64,
        requirements: &UserRequirements,
    ) -> Result<Self, InputError> {
        let total_funds = check_amount("total funds", total_funds)?;
        if !increment.is_finite() || increment <= 0.0 {
            return Err(InputError::InvalidIncrement(increment));
        }

        if total_funds / increment > MAX_UNITS as f64 {
            return Err(InputError::IncrementTooFine {
                total: total_funds,
                increment,
            });
        }
        let units = to_units(total_funds, increment);
        let mut accounts = Vec::with_capacity(registry.len());
        let mut caps = Vec::with_capacity(registry.len());
        let mut excluded = Vec::new();

        for schedule in registry.iter() {
            if !schedule.participates(requirements) {
                tracing::debug!(account = %schedule.key, "excluded by participation pre-check");
                excluded.push(schedule.id);
                continue;
            }
            let cap = schedule
                .max_cap
                .map_or(units, |cap| to_units(cap, increment))
                .min(units);
            if cap == 0 {
                continue;
            }
            accounts.push(schedule.id);
            caps.push(cap);
        }

        let mut suffix_caps = vec![0u64; caps.len() + 1];
        for i in (0..caps.len()).rev() {
            suffix_caps[i] = suffix_caps[i + 1].saturating_add(caps[i]);
        }

        Ok(Self {
            accounts,
            caps,
            suffix_caps,
            units,
            increment,
            excluded,
        })
    }

    /// Amount every distribution allocates: `floor(total / increment) * increment`
    #[must_use]
    pub fn allocatable(&self) -> f64 {
        self.units as f64 * self.increment
    }

    #[must_use]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Accounts that take part in the search, in registry order
    #[must_use]
    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    /// Accounts dropped by the participation pre-check
    #[must_use]
    pub fn excluded(&self) -> &[AccountId] {
        &self.excluded
    }

    /// Whether at least one distribution exists
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.units <= self.suffix_caps[0]
    }

    /// A fresh pass over the distributions, from the beginning
    #[must_use]
    pub fn iter(&self) -> Distributions {
        Distributions::new(self)
    }

    /// Exact number of distributions (saturating), or `None` when the space
    /// is too fine-grained to count cheaply
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        if !self.is_feasible() {
            return Some(0);
        }
        if self.units > MAX_COUNTED_UNITS {
            return None;
        }

        let units = self.units as usize;
        // ways[r]: number of ways the accounts seen so far can hold exactly r units
        let mut ways = vec![0u64; units + 1];
        ways[0] = 1;
        for &cap in &self.caps {
            let cap = cap as usize;
            let mut prefix = vec![0u64; units + 2];
            for r in 0..=units {
                prefix[r + 1] = prefix[r].saturating_add(ways[r]);
            }
            for (r, slot) in ways.iter_mut().enumerate() {
                let low = r.saturating_sub(cap);
                *slot = match prefix[r + 1] {
                    u64::MAX => u64::MAX,
                    sum => sum - prefix[low],
                };
            }
        }
        Some(ways[units])
    }
}

impl<'a> IntoIterator for &'a DistributionSpace {
    type Item = Distribution;
    type IntoIter = Distributions;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn to_units(amount: f64, increment: f64) -> u64 {
    (amount / increment + UNIT_EPSILON).floor() as u64
}

/// One level of the backtracking search
#[derive(Debug, Clone)]
struct Frame {
    depth: usize,
    remaining: u64,
    next: u64,
    last: u64,
    /// Units given to the accounts before `depth`
    prefix: Vec<u64>,
}

/// Lazy iterator over a [`DistributionSpace`].
///
/// Dropping it part-way is how a caller stops the enumeration.
#[derive(Debug, Clone)]
pub struct Distributions {
    accounts: Vec<AccountId>,
    caps: Vec<u64>,
    suffix_caps: Vec<u64>,
    increment: f64,
    stack: Vec<Frame>,
    /// With no accounts and nothing to place, the empty split is the one result
    pending_empty: bool,
}

impl Distributions {
    fn new(space: &DistributionSpace) -> Self {
        let mut iter = Self {
            accounts: space.accounts.clone(),
            caps: space.caps.clone(),
            suffix_caps: space.suffix_caps.clone(),
            increment: space.increment,
            stack: Vec::with_capacity(space.accounts.len()),
            pending_empty: false,
        };

        if space.is_feasible() {
            if iter.accounts.is_empty() {
                iter.pending_empty = true;
            } else {
                let root = iter.frame(0, space.units, Vec::new());
                iter.stack.push(root);
            }
        }
        iter
    }

    fn frame(&self, depth: usize, remaining: u64, prefix: Vec<u64>) -> Frame {
        Frame {
            depth,
            remaining,
            // whatever the later accounts cannot hold has to go here
            next: remaining.saturating_sub(self.suffix_caps[depth + 1]),
            last: remaining.min(self.caps[depth]),
            prefix,
        }
    }

    fn distribution(&self, units: &[u64]) -> Distribution {
        let allocations = self
            .accounts
            .iter()
            .zip(units)
            .filter(|&(_, &u)| u > 0)
            .map(|(&account_id, &u)| Allocation {
                account_id,
                amount: u as f64 * self.increment,
            })
            .collect();
        Distribution { allocations }
    }
}

impl Iterator for Distributions {
    type Item = Distribution;

    fn next(&mut self) -> Option<Distribution> {
        if self.pending_empty {
            self.pending_empty = false;
            return Some(Distribution::default());
        }

        loop {
            let frame = self.stack.last_mut()?;
            if frame.next > frame.last {
                self.stack.pop();
                continue;
            }

            let units = frame.next;
            frame.next += 1;
            let depth = frame.depth;
            let rest = frame.remaining - units;
            let mut prefix = frame.prefix.clone();
            prefix.push(units);

            if depth + 1 == self.accounts.len() {
                debug_assert_eq!(rest, 0, "last account must absorb the remainder");
                return Some(self.distribution(&prefix));
            }
            let child = self.frame(depth + 1, rest, prefix);
            self.stack.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleBuilder;
    use crate::model::Eligibility;

    fn capped(key: &str, cap: f64) -> ScheduleBuilder {
        ScheduleBuilder::new(key, key)
            .tier(cap, 0.01, "")
            .max_cap(cap)
    }

    fn space(builders: Vec<ScheduleBuilder>, total: f64) -> DistributionSpace {
        let registry = RateRegistry::from_builders(builders).unwrap();
        DistributionSpace::new(&registry, total, 5_000.0, &UserRequirements::default()).unwrap()
    }

    #[test]
    fn test_two_accounts_in_order() {
        let space = space(vec![capped("a", 10_000.0), capped("b", 10_000.0)], 10_000.0);
        let got: Vec<(f64, f64)> = space
            .iter()
            .map(|d| (d.amount_for(AccountId(0)), d.amount_for(AccountId(1))))
            .collect();
        assert_eq!(
            got,
            vec![(0.0, 10_000.0), (5_000.0, 5_000.0), (10_000.0, 0.0)]
        );
        assert_eq!(space.count(), Some(3));
    }

    #[test]
    fn test_caps_bound_the_search() {
        let space = space(vec![capped("a", 5_000.0), capped("b", 20_000.0)], 20_000.0);
        let got: Vec<f64> = space.iter().map(|d| d.amount_for(AccountId(0))).collect();
        assert_eq!(got, vec![0.0, 5_000.0]);
    }

    #[test]
    fn test_total_rounds_down_to_increment() {
        let space = space(vec![capped("a", 50_000.0)], 12_345.0);
        assert_eq!(space.allocatable(), 10_000.0);
        let all: Vec<Distribution> = space.iter().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].total(), 10_000.0);
    }

    #[test]
    fn test_infeasible_when_caps_too_small() {
        let space = space(vec![capped("a", 5_000.0)], 20_000.0);
        assert!(!space.is_feasible());
        assert_eq!(space.iter().count(), 0);
        assert_eq!(space.count(), Some(0));
    }

    #[test]
    fn test_zero_funds_yield_one_empty_split() {
        let space = space(vec![capped("a", 5_000.0), capped("b", 5_000.0)], 0.0);
        let all: Vec<Distribution> = space.iter().collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn test_participation_excludes_account() {
        let registry = RateRegistry::from_builders(vec![
            capped("open", 50_000.0),
            capped("salaried", 50_000.0).requires(Eligibility::Salary { min_amount: 0.0 }),
        ])
        .unwrap();
        let space =
            DistributionSpace::new(&registry, 20_000.0, 5_000.0, &UserRequirements::default())
                .unwrap();
        assert_eq!(space.accounts(), &[AccountId(0)]);
        assert_eq!(space.excluded(), &[AccountId(1)]);
        assert_eq!(space.iter().count(), 1);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let registry = RateRegistry::from_builders(vec![capped("a", 5_000.0)]).unwrap();
        let req = UserRequirements::default();
        assert_eq!(
            DistributionSpace::new(&registry, -1.0, 5_000.0, &req).unwrap_err(),
            InputError::NegativeAmount {
                field: "total funds",
                value: -1.0
            }
        );
        assert!(matches!(
            DistributionSpace::new(&registry, f64::NAN, 5_000.0, &req),
            Err(InputError::NonFiniteAmount { .. })
        ));
        assert!(matches!(
            DistributionSpace::new(&registry, 10_000.0, 0.0, &req),
            Err(InputError::InvalidIncrement(_))
        ));
    }
}
