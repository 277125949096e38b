//! Schedule Builder DSL
//!
//! Provides a fluent API for describing account rate schedules.
//!
//! # Examples
//!
//! ```ignore
//! use savesplit_core::config::ScheduleBuilder;
//! use savesplit_core::model::{AccountId, BonusCategory, Eligibility};
//!
//! let schedule = ScheduleBuilder::new("everyday", "Everyday Saver")
//!     .tier(20_000.0, 0.033, "First $20K")
//!     .tier(50_000.0, 0.03, "Next $30K")
//!     .overflow_rate(0.0, "No interest above $50K")
//!     .bonus(
//!         BonusCategory::Spend,
//!         "Card spend",
//!         50_000.0,
//!         0.005,
//!         Eligibility::MinSpend(500.0),
//!     )
//!     .max_cap(50_000.0)
//!     .build(AccountId(0));
//! ```

use crate::model::{
    AccountId, AccountRateSchedule, BaseTier, BonusCategory, BonusTier, Eligibility, OverflowRule,
};

/// Builder for account rate schedules
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    key: String,
    name: String,
    base_tiers: Vec<BaseTier>,
    overflow: OverflowRule,
    bonus_tiers: Vec<BonusTier>,
    max_cap: Option<f64>,
    participation: Eligibility,
    accepts_salary_code: bool,
}

impl ScheduleBuilder {
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            base_tiers: Vec::new(),
            overflow: OverflowRule::LastRate,
            bonus_tiers: Vec::new(),
            max_cap: None,
            participation: Eligibility::Always,
            accepts_salary_code: false,
        }
    }

    // =========================================================================
    // Base waterfall
    // =========================================================================

    /// Add a base tier ending at the cumulative balance `up_to`
    #[must_use]
    pub fn tier(mut self, up_to: f64, rate: f64, remark: impl Into<String>) -> Self {
        self.base_tiers.push(BaseTier {
            up_to,
            rate,
            remark: remark.into(),
        });
        self
    }

    /// Balances above the last tier earn `rate`
    #[must_use]
    pub fn overflow_rate(mut self, rate: f64, remark: impl Into<String>) -> Self {
        self.overflow = OverflowRule::Rate {
            rate,
            remark: remark.into(),
        };
        self
    }

    /// Balances above the last tier keep earning the last tier's rate
    #[must_use]
    pub fn overflow_last_rate(mut self) -> Self {
        self.overflow = OverflowRule::LastRate;
        self
    }

    // =========================================================================
    // Bonus tiers
    // =========================================================================

    /// Bonus paid on `min(deposit, up_to)` when `eligibility` holds
    #[must_use]
    pub fn bonus(
        self,
        category: BonusCategory,
        label: impl Into<String>,
        up_to: f64,
        rate: f64,
        eligibility: Eligibility,
    ) -> Self {
        self.banded_bonus(category, label, 0.0, up_to, rate, eligibility)
    }

    /// Bonus paid on the part of the deposit between `from` and `up_to`
    #[must_use]
    pub fn banded_bonus(
        mut self,
        category: BonusCategory,
        label: impl Into<String>,
        from: f64,
        up_to: f64,
        rate: f64,
        eligibility: Eligibility,
    ) -> Self {
        self.bonus_tiers.push(BonusTier {
            category,
            label: label.into(),
            from,
            up_to,
            rate,
            eligibility,
        });
        self
    }

    // =========================================================================
    // Enumeration hints
    // =========================================================================

    /// Largest amount the enumerator will place in this account
    #[must_use]
    pub fn max_cap(mut self, cap: f64) -> Self {
        self.max_cap = Some(cap);
        self
    }

    /// Only fund the account when `eligibility` can hold
    #[must_use]
    pub fn requires(mut self, eligibility: Eligibility) -> Self {
        self.participation = eligibility;
        self
    }

    /// Treat a salary-equivalent transaction code as a salary credit
    #[must_use]
    pub fn accepts_salary_code(mut self) -> Self {
        self.accepts_salary_code = true;
        self
    }

    /// Finish the schedule under the given id
    #[must_use]
    pub fn build(self, id: AccountId) -> AccountRateSchedule {
        AccountRateSchedule {
            id,
            key: self.key,
            name: self.name,
            base_tiers: self.base_tiers,
            overflow: self.overflow,
            bonus_tiers: self.bonus_tiers,
            max_cap: self.max_cap,
            participation: self.participation,
            accepts_salary_code: self.accepts_salary_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let schedule = ScheduleBuilder::new("plain", "Plain").build(AccountId(3));
        assert_eq!(schedule.id, AccountId(3));
        assert_eq!(schedule.overflow, OverflowRule::LastRate);
        assert_eq!(schedule.participation, Eligibility::Always);
        assert!(schedule.max_cap.is_none());
        assert!(!schedule.accepts_salary_code);
    }

    #[test]
    fn test_bonus_starts_at_zero() {
        let schedule = ScheduleBuilder::new("b", "B")
            .bonus(
                BonusCategory::Giro,
                "Bills",
                10_000.0,
                0.01,
                Eligibility::MinGiro(3),
            )
            .build(AccountId(0));
        assert_eq!(schedule.bonus_tiers[0].from, 0.0);
        assert_eq!(schedule.bonus_tiers[0].up_to, 10_000.0);
    }
}
