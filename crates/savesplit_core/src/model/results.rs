//! Distributions and the scored results produced from them

use serde::{Deserialize, Serialize};

use super::ids::AccountId;
use super::schedule::BonusCategory;

/// Round a currency value to cents.
///
/// Only applied when a value leaves the engine; internal sums stay unrounded.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Money placed in one account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub account_id: AccountId,
    pub amount: f64,
}

/// One way of splitting the funds across accounts.
///
/// Only funded accounts are stored, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub allocations: Vec<Allocation>,
}

impl Distribution {
    /// Build from `(account, amount)` pairs, dropping unfunded accounts
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (AccountId, f64)>) -> Self {
        let mut allocations: Vec<Allocation> = pairs
            .into_iter()
            .filter(|&(_, amount)| amount > 0.0)
            .map(|(account_id, amount)| Allocation { account_id, amount })
            .collect();
        allocations.sort_by_key(|a| a.account_id);
        Self { allocations }
    }

    /// Amount allocated to an account (0 when it is not funded)
    #[must_use]
    pub fn amount_for(&self, account_id: AccountId) -> f64 {
        self.allocations
            .iter()
            .find(|a| a.account_id == account_id)
            .map_or(0.0, |a| a.amount)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Funded accounts in registry order
    pub fn funded(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(|a| a.amount > 0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

/// Which part of a schedule a breakdown line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierKind {
    Base,
    Overflow,
    Bonus(BonusCategory),
}

/// One line of an account's interest breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub kind: TierKind,
    pub label: String,
    pub amount_in_tier: f64,
    pub rate: f64,
    /// Interest for this line, rounded to cents
    pub interest: f64,
}

/// Tier evaluator output for one account and one amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestBreakdown {
    /// Annual interest rounded to cents
    pub total_interest: f64,
    /// Unrounded annual interest, used for comparisons inside the engine
    pub raw_interest: f64,
    pub effective_rate: f64,
    pub breakdown: Vec<TierBreakdown>,
}

impl InterestBreakdown {
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total_interest: 0.0,
            raw_interest: 0.0,
            effective_rate: 0.0,
            breakdown: Vec::new(),
        }
    }
}

/// Interest earned by one funded account within a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResult {
    pub account_id: AccountId,
    pub key: String,
    pub name: String,
    pub amount: f64,
    pub total_interest: f64,
    pub effective_rate: f64,
    pub is_salary_bank: bool,
    pub breakdown: Vec<TierBreakdown>,
}

/// Scored outcome of one complete distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Position of the distribution in enumeration order
    pub index: u64,
    pub distribution: Distribution,
    pub accounts: Vec<AccountResult>,
    pub total_interest: f64,
    pub effective_rate: f64,
    pub monthly_interest: f64,
    pub salary_account: Option<AccountId>,
}

impl ScenarioResult {
    #[must_use]
    pub fn allocated_total(&self) -> f64 {
        self.distribution.total()
    }

    /// Account result flagged as the salary account, if any
    #[must_use]
    pub fn salary_bank(&self) -> Option<&AccountResult> {
        self.accounts.iter().find(|a| a.is_salary_bank)
    }
}
