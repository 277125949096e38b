//! Built-in account schedules
//!
//! Multi-tier savings accounts in the style of the Singapore retail banks.
//! Rates are illustrative; refresh them from each bank's published schedule
//! before relying on the numbers.

use crate::model::{BonusCategory, Eligibility};

use super::ScheduleBuilder;

const BASE_RATE: f64 = 0.0005;

impl ScheduleBuilder {
    /// Salary + card spend unlock a steep ladder; bills + spend a flatter one
    #[must_use]
    pub fn uob_one() -> Self {
        let salary_and_spend = Eligibility::All(vec![
            Eligibility::Salary { min_amount: 1_600.0 },
            Eligibility::MinSpend(500.0),
        ]);
        let giro_and_spend = Eligibility::All(vec![
            Eligibility::MinSpend(500.0),
            Eligibility::MinGiro(3),
            Eligibility::Not(Box::new(Eligibility::Salary { min_amount: 1_600.0 })),
        ]);

        ScheduleBuilder::new("uob-one", "UOB One")
            .tier(150_000.0, BASE_RATE, "Base rate")
            .banded_bonus(
                BonusCategory::Salary,
                "Salary + spend, first $75K",
                0.0,
                75_000.0,
                0.0295,
                salary_and_spend.clone(),
            )
            .banded_bonus(
                BonusCategory::Salary,
                "Salary + spend, next $50K",
                75_000.0,
                125_000.0,
                0.0445,
                salary_and_spend.clone(),
            )
            .banded_bonus(
                BonusCategory::Salary,
                "Salary + spend, next $25K",
                125_000.0,
                150_000.0,
                0.0595,
                salary_and_spend,
            )
            .banded_bonus(
                BonusCategory::Giro,
                "Bills + spend, first $75K",
                0.0,
                75_000.0,
                0.0145,
                giro_and_spend.clone(),
            )
            .banded_bonus(
                BonusCategory::Giro,
                "Bills + spend, next $50K",
                75_000.0,
                125_000.0,
                0.0195,
                giro_and_spend,
            )
            .max_cap(150_000.0)
    }

    /// Independent categories, each paying on the first $75K and the next $25K
    #[must_use]
    pub fn ocbc_360() -> Self {
        ScheduleBuilder::new("ocbc-360", "OCBC 360")
            .tier(100_000.0, BASE_RATE, "Base rate")
            .banded_bonus(
                BonusCategory::Salary,
                "Salary, first $75K",
                0.0,
                75_000.0,
                0.016,
                Eligibility::Salary { min_amount: 1_800.0 },
            )
            .banded_bonus(
                BonusCategory::Salary,
                "Salary, next $25K",
                75_000.0,
                100_000.0,
                0.032,
                Eligibility::Salary { min_amount: 1_800.0 },
            )
            .banded_bonus(
                BonusCategory::Extra,
                "Save, first $75K",
                0.0,
                75_000.0,
                0.006,
                Eligibility::IncreasedBalance,
            )
            .banded_bonus(
                BonusCategory::Extra,
                "Save, next $25K",
                75_000.0,
                100_000.0,
                0.012,
                Eligibility::IncreasedBalance,
            )
            .bonus(
                BonusCategory::Spend,
                "Spend",
                100_000.0,
                0.005,
                Eligibility::MinSpend(500.0),
            )
            .bonus(
                BonusCategory::Insurance,
                "Insure",
                100_000.0,
                0.012,
                Eligibility::Insurance { min_amount: 0.0 },
            )
            .bonus(
                BonusCategory::Investment,
                "Invest",
                100_000.0,
                0.012,
                Eligibility::Investment {
                    min_amount: 20_000.0,
                },
            )
            .bonus(
                BonusCategory::Wealth,
                "Grow",
                100_000.0,
                0.022,
                Eligibility::GrewWealth,
            )
            .max_cap(100_000.0)
    }

    /// Only open to salaried customers; a salary-code transfer also counts
    #[must_use]
    pub fn dbs_multiplier() -> Self {
        let salary_and_spend = Eligibility::All(vec![
            Eligibility::Salary { min_amount: 0.0 },
            Eligibility::MinSpend(500.0),
        ]);
        let second_category = Eligibility::All(vec![
            salary_and_spend.clone(),
            Eligibility::Any(vec![
                Eligibility::Insurance { min_amount: 0.0 },
                Eligibility::Investment { min_amount: 0.0 },
                Eligibility::HomeLoan { min_amount: 0.0 },
            ]),
        ]);

        ScheduleBuilder::new("dbs-multiplier", "DBS Multiplier")
            .tier(100_000.0, BASE_RATE, "Base rate")
            .bonus(
                BonusCategory::Salary,
                "Salary + 1 category",
                50_000.0,
                0.018,
                salary_and_spend,
            )
            .bonus(
                BonusCategory::Extra,
                "Salary + 2 categories",
                100_000.0,
                0.006,
                second_category,
            )
            .requires(Eligibility::Salary { min_amount: 0.0 })
            .accepts_salary_code()
            .max_cap(100_000.0)
    }

    #[must_use]
    pub fn sc_bonus_saver() -> Self {
        ScheduleBuilder::new("sc-bonus-saver", "Standard Chartered Bonus$aver")
            .tier(100_000.0, BASE_RATE, "Base rate")
            .bonus(
                BonusCategory::Spend,
                "Card spend",
                100_000.0,
                0.014,
                Eligibility::MinSpend(1_000.0),
            )
            .bonus(
                BonusCategory::Salary,
                "Salary credit",
                100_000.0,
                0.02,
                Eligibility::Salary { min_amount: 3_000.0 },
            )
            .bonus(
                BonusCategory::Giro,
                "Bill payments",
                100_000.0,
                0.0023,
                Eligibility::MinGiro(3),
            )
            .bonus(
                BonusCategory::Insurance,
                "Insure",
                100_000.0,
                0.02,
                Eligibility::Insurance { min_amount: 0.0 },
            )
            .bonus(
                BonusCategory::Investment,
                "Invest",
                100_000.0,
                0.02,
                Eligibility::Investment { min_amount: 0.0 },
            )
            .max_cap(100_000.0)
    }

    #[must_use]
    pub fn boc_smartsaver() -> Self {
        ScheduleBuilder::new("boc-smartsaver", "BOC SmartSaver")
            .tier(100_000.0, 0.0015, "Base rate")
            .bonus(
                BonusCategory::Spend,
                "Card spend",
                100_000.0,
                0.008,
                Eligibility::MinSpend(500.0),
            )
            .bonus(
                BonusCategory::Salary,
                "Salary credit",
                100_000.0,
                0.019,
                Eligibility::Salary { min_amount: 2_000.0 },
            )
            .bonus(
                BonusCategory::Giro,
                "Bill payments",
                100_000.0,
                0.009,
                Eligibility::MinGiro(3),
            )
            .max_cap(100_000.0)
    }

    /// No conditions; pays nothing above its ceiling
    #[must_use]
    pub fn trust_savings() -> Self {
        ScheduleBuilder::new("trust-savings", "Trust Savings")
            .tier(20_000.0, 0.0125, "First $20K")
            .tier(50_000.0, 0.0175, "Next $30K")
            .overflow_rate(0.0, "No interest above $50K")
            .max_cap(50_000.0)
    }
}

/// The built-in table, in registry order
#[must_use]
pub fn builtin_builders() -> Vec<ScheduleBuilder> {
    vec![
        ScheduleBuilder::uob_one(),
        ScheduleBuilder::ocbc_360(),
        ScheduleBuilder::dbs_multiplier(),
        ScheduleBuilder::sc_bonus_saver(),
        ScheduleBuilder::boc_smartsaver(),
        ScheduleBuilder::trust_savings(),
    ]
}
