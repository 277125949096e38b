//! What the user can bring to a bank in a month
//!
//! Bonus tiers are gated on these values. Every field is optional on input:
//! anything not supplied is treated as `false` / `0`.

use serde::{Deserialize, Serialize};

/// Monthly banking activity and product holdings of the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequirements {
    /// Whether the user has a salary that can be credited to one account
    pub has_salary: bool,
    /// Monthly salary credit
    pub salary_amount: f64,

    /// Monthly card spend
    pub spend_amount: f64,

    /// Number of bill payments (GIRO) per month
    pub giro_count: u32,

    pub has_insurance: bool,
    pub insurance_amount: f64,

    pub has_investments: bool,
    pub investment_amount: f64,

    pub has_home_loan: bool,
    pub home_loan_amount: f64,

    /// The user can route `salary_amount` under a salary-equivalent
    /// transaction code. Only schedules that accept the code treat it as a
    /// salary credit.
    pub salary_code: bool,

    /// Month-on-month increase in average daily balance
    pub increased_balance: bool,

    /// Total relationship balance grew past the bank's wealth threshold
    pub grew_wealth: bool,
}

impl UserRequirements {
    /// Requirements with a salary credit of the given amount
    #[must_use]
    pub fn with_salary(salary_amount: f64) -> Self {
        Self {
            has_salary: true,
            salary_amount,
            ..Default::default()
        }
    }

    /// Whether a salary selection is needed for this run at all
    #[must_use]
    pub fn wants_salary_assignment(&self) -> bool {
        self.has_salary || self.salary_code
    }
}
