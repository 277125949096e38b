//! Account rate schedules
//!
//! A schedule is pure data: a waterfall of base tiers, a rule for balances
//! above the last tier, and a set of bonus tiers each gated by an
//! eligibility predicate. The tier evaluator in [`crate::tiers`] is the only
//! interpreter of this data; no account gets special-cased code.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

use super::ids::AccountId;
use super::requirements::UserRequirements;

/// One band of the base-rate waterfall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTier {
    /// Cumulative balance ceiling of this tier. The tier absorbs the balance
    /// between the previous tier's ceiling and this one.
    pub up_to: f64,
    /// Annual rate as a fraction (0.03 = 3%)
    pub rate: f64,
    /// Free-text note shown next to the tier
    #[serde(default)]
    pub remark: String,
}

/// How balances above the last base tier earn interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum OverflowRule {
    /// Keep paying the rate of the last base tier (0 if there are no tiers)
    #[default]
    LastRate,
    /// Terminal tier with its own rate, possibly 0
    Rate { rate: f64, remark: String },
}

/// Which incentive a bonus tier rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusCategory {
    Salary,
    Spend,
    Investment,
    Insurance,
    Giro,
    Wealth,
    Extra,
}

impl BonusCategory {
    pub const ALL: [BonusCategory; 7] = [
        BonusCategory::Salary,
        BonusCategory::Spend,
        BonusCategory::Investment,
        BonusCategory::Insurance,
        BonusCategory::Giro,
        BonusCategory::Wealth,
        BonusCategory::Extra,
    ];

    /// Lowercase name used in configuration files
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BonusCategory::Salary => "salary",
            BonusCategory::Spend => "spend",
            BonusCategory::Investment => "investment",
            BonusCategory::Insurance => "insurance",
            BonusCategory::Giro => "giro",
            BonusCategory::Wealth => "wealth",
            BonusCategory::Extra => "extra",
        }
    }

    /// Parse a configuration name; `bill` is accepted for GIRO bonuses
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "bill" | "bills" => Some(BonusCategory::Giro),
            "overflow" => Some(BonusCategory::Extra),
            _ => Self::ALL.into_iter().find(|c| c.as_str() == name),
        }
    }
}

impl std::fmt::Display for BonusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate over the user's requirements that gates a bonus tier or an
/// account's participation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Eligibility {
    #[default]
    Always,
    /// Salary of at least `min_amount` credited to this account
    Salary { min_amount: f64 },
    MinSpend(f64),
    MinGiro(u32),
    Insurance { min_amount: f64 },
    Investment { min_amount: f64 },
    HomeLoan { min_amount: f64 },
    IncreasedBalance,
    GrewWealth,
    All(Vec<Eligibility>),
    Any(Vec<Eligibility>),
    Not(Box<Eligibility>),
}

/// Inputs an eligibility predicate is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct EligibilityContext<'a> {
    pub requirements: &'a UserRequirements,
    /// The salary (or a salary-equivalent code credit) lands in this account
    pub salary_credited: bool,
}

impl Eligibility {
    #[must_use]
    pub fn is_met(&self, ctx: &EligibilityContext<'_>) -> bool {
        let req = ctx.requirements;
        match self {
            Eligibility::Always => true,
            Eligibility::Salary { min_amount } => {
                ctx.salary_credited && req.salary_amount >= *min_amount
            }
            Eligibility::MinSpend(min) => req.spend_amount >= *min,
            Eligibility::MinGiro(count) => req.giro_count >= *count,
            Eligibility::Insurance { min_amount } => {
                req.has_insurance && req.insurance_amount >= *min_amount
            }
            Eligibility::Investment { min_amount } => {
                req.has_investments && req.investment_amount >= *min_amount
            }
            Eligibility::HomeLoan { min_amount } => {
                req.has_home_loan && req.home_loan_amount >= *min_amount
            }
            Eligibility::IncreasedBalance => req.increased_balance,
            Eligibility::GrewWealth => req.grew_wealth,
            Eligibility::All(preds) => preds.iter().all(|p| p.is_met(ctx)),
            Eligibility::Any(preds) => preds.iter().any(|p| p.is_met(ctx)),
            Eligibility::Not(pred) => !pred.is_met(ctx),
        }
    }

    /// Whether the predicate can only hold for the salary account
    #[must_use]
    pub fn mentions_salary(&self) -> bool {
        match self {
            Eligibility::Salary { .. } => true,
            Eligibility::All(preds) | Eligibility::Any(preds) => {
                preds.iter().any(Eligibility::mentions_salary)
            }
            Eligibility::Not(pred) => pred.mentions_salary(),
            _ => false,
        }
    }
}

/// Additive interest component gated by an eligibility predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTier {
    pub category: BonusCategory,
    pub label: String,
    /// Lower edge of the balance slice the bonus pays on
    #[serde(default)]
    pub from: f64,
    /// Upper edge of the slice; with `from = 0` this is a cap on the whole
    /// deposit
    pub up_to: f64,
    pub rate: f64,
    #[serde(default)]
    pub eligibility: Eligibility,
}

impl BonusTier {
    /// Portion of `amount` that falls into this bonus slice
    #[must_use]
    pub fn slice_of(&self, amount: f64) -> f64 {
        (amount.min(self.up_to) - self.from).max(0.0)
    }
}

/// Static description of one account's interest rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRateSchedule {
    pub id: AccountId,
    /// Stable slug used by configuration files
    pub key: String,
    pub name: String,
    pub base_tiers: Vec<BaseTier>,
    #[serde(default)]
    pub overflow: OverflowRule,
    #[serde(default)]
    pub bonus_tiers: Vec<BonusTier>,
    /// Largest allocation the enumerator will consider (`None` = unbounded)
    #[serde(default)]
    pub max_cap: Option<f64>,
    /// Coarse gate on whether the account is worth funding at all
    #[serde(default)]
    pub participation: Eligibility,
    /// A salary-equivalent transaction code counts as a salary credit here
    #[serde(default)]
    pub accepts_salary_code: bool,
}

impl AccountRateSchedule {
    /// Whether a salary credit can land in this account for these requirements
    #[must_use]
    pub fn can_receive_salary(&self, requirements: &UserRequirements) -> bool {
        requirements.has_salary || (requirements.salary_code && self.accepts_salary_code)
    }

    /// Coarse pre-check used to prune the enumeration.
    ///
    /// An account is only excluded when no salary assignment could make it
    /// participate: the gate is tried both with and without the salary
    /// credit, since predicates such as `Not(Salary)` favour its absence.
    #[must_use]
    pub fn participates(&self, requirements: &UserRequirements) -> bool {
        let met = |salary_credited| {
            self.participation.is_met(&EligibilityContext {
                requirements,
                salary_credited,
            })
        };
        met(false) || (self.can_receive_salary(requirements) && met(true))
    }

    /// Rate paid on balances above the last base tier
    #[must_use]
    pub fn overflow_rate(&self) -> f64 {
        match &self.overflow {
            OverflowRule::LastRate => self.base_tiers.last().map_or(0.0, |t| t.rate),
            OverflowRule::Rate { rate, .. } => *rate,
        }
    }

    /// Check that the schedule is internally consistent
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut previous = 0.0;
        for (index, tier) in self.base_tiers.iter().enumerate() {
            if !tier.up_to.is_finite() || tier.up_to < 0.0 {
                return Err(ConfigurationError::NegativeTierCap {
                    account: self.id,
                    index,
                    cap: tier.up_to,
                });
            }
            if index > 0 && tier.up_to <= previous {
                return Err(ConfigurationError::NonMonotonicTiers {
                    account: self.id,
                    index,
                });
            }
            check_rate(self.id, &tier.remark, tier.rate)?;
            previous = tier.up_to;
        }

        if let OverflowRule::Rate { rate, remark } = &self.overflow {
            check_rate(self.id, remark, *rate)?;
        }

        for bonus in &self.bonus_tiers {
            check_rate(self.id, &bonus.label, bonus.rate)?;
            let band_ok = bonus.from.is_finite()
                && bonus.from >= 0.0
                && !bonus.up_to.is_nan()
                && bonus.up_to >= bonus.from;
            if !band_ok {
                return Err(ConfigurationError::InvalidBonusBand {
                    account: self.id,
                    label: bonus.label.clone(),
                    from: bonus.from,
                    up_to: bonus.up_to,
                });
            }
        }

        match self.max_cap {
            Some(cap) if cap.is_nan() || cap < 0.0 => Err(ConfigurationError::InvalidMaxCap {
                account: self.id,
                cap,
            }),
            _ => Ok(()),
        }
    }
}

fn check_rate(account: AccountId, label: &str, rate: f64) -> Result<(), ConfigurationError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidRate {
            account,
            label: label.to_string(),
            rate,
        })
    }
}
