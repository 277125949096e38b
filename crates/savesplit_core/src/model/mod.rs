mod ids;
mod requirements;
mod results;
mod schedule;

pub use ids::AccountId;
pub use requirements::UserRequirements;
pub use results::{
    AccountResult, Allocation, Distribution, InterestBreakdown, ScenarioResult, TierBreakdown,
    TierKind, round_cents,
};
pub use schedule::{
    AccountRateSchedule, BaseTier, BonusCategory, BonusTier, Eligibility, EligibilityContext,
    OverflowRule,
};
