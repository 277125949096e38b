//! Tier evaluation for a single account
//!
//! Interest on a hypothetical deposit is the sum of two independent parts:
//!
//! - the **base waterfall**: tiers are filled in ascending ceiling order,
//!   each absorbing up to its own width before the remainder moves on. Funds
//!   left after the last tier earn the schedule's overflow rate.
//! - **bonus tiers**: each one checks its eligibility predicate and, when it
//!   holds, pays its rate on its slice of the *whole* deposit. Bonuses stack
//!   additively, including bonuses whose slices overlap.
//!
//! All accumulation is unrounded. Values are rounded to cents only on the
//! way out.

use crate::error::ConfigurationError;
use crate::model::{
    AccountRateSchedule, BonusTier, EligibilityContext, InterestBreakdown, OverflowRule,
    TierBreakdown, TierKind, UserRequirements, round_cents,
};

/// Slack allowed when checking an in-tier amount against its width
const TIER_TOLERANCE: f64 = 1e-6;

/// Compute one account's annual interest for `amount`.
///
/// `is_salary_bank` says whether the salary credit of this scenario lands in
/// this account; salary-gated bonuses only pay when it does.
pub fn evaluate_interest(
    schedule: &AccountRateSchedule,
    amount: f64,
    requirements: &UserRequirements,
    is_salary_bank: bool,
) -> Result<InterestBreakdown, ConfigurationError> {
    schedule.validate()?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(ConfigurationError::InvalidAmount {
            account: schedule.id,
            amount,
        });
    }
    if amount == 0.0 {
        return Ok(InterestBreakdown::zero());
    }

    let mut breakdown = Vec::with_capacity(schedule.base_tiers.len() + 2);
    let mut raw_interest = waterfall(schedule, amount, &mut breakdown);

    let ctx = EligibilityContext {
        requirements,
        salary_credited: is_salary_bank && schedule.can_receive_salary(requirements),
    };
    for bonus in schedule
        .bonus_tiers
        .iter()
        .filter(|b| b.eligibility.is_met(&ctx))
    {
        raw_interest += apply_bonus(schedule, bonus, amount, &mut breakdown);
    }

    Ok(InterestBreakdown {
        total_interest: round_cents(raw_interest),
        raw_interest,
        effective_rate: raw_interest / amount,
        breakdown,
    })
}

/// Fill the base tiers in order and return the unrounded base interest
fn waterfall(schedule: &AccountRateSchedule, amount: f64, lines: &mut Vec<TierBreakdown>) -> f64 {
    let mut remaining = amount;
    let mut floor = 0.0;
    let mut interest = 0.0;

    for tier in &schedule.base_tiers {
        if remaining <= 0.0 {
            break;
        }
        let width = tier.up_to - floor;
        let in_tier = clamp_to_width(schedule, remaining.min(width), width);
        let lower = floor;
        floor = tier.up_to;
        if in_tier <= 0.0 {
            continue;
        }

        let tier_interest = in_tier * tier.rate;
        interest += tier_interest;
        remaining -= in_tier;
        lines.push(TierBreakdown {
            kind: TierKind::Base,
            label: tier_label(&tier.remark, lower, Some(tier.up_to)),
            amount_in_tier: in_tier,
            rate: tier.rate,
            interest: round_cents(tier_interest),
        });
    }

    if remaining > 0.0 {
        let rate = schedule.overflow_rate();
        let remark = match &schedule.overflow {
            OverflowRule::Rate { remark, .. } => remark.as_str(),
            OverflowRule::LastRate => "",
        };
        let overflow_interest = remaining * rate;
        interest += overflow_interest;
        lines.push(TierBreakdown {
            kind: TierKind::Overflow,
            label: tier_label(remark, floor, None),
            amount_in_tier: remaining,
            rate,
            interest: round_cents(overflow_interest),
        });
    }

    interest
}

/// Add one eligible bonus line and return its unrounded interest
fn apply_bonus(
    schedule: &AccountRateSchedule,
    bonus: &BonusTier,
    amount: f64,
    lines: &mut Vec<TierBreakdown>,
) -> f64 {
    let slice = clamp_to_width(schedule, bonus.slice_of(amount), bonus.up_to - bonus.from);
    if slice <= 0.0 {
        return 0.0;
    }
    let interest = slice * bonus.rate;
    lines.push(TierBreakdown {
        kind: TierKind::Bonus(bonus.category),
        label: bonus.label.clone(),
        amount_in_tier: slice,
        rate: bonus.rate,
        interest: round_cents(interest),
    });
    interest
}

/// An in-tier amount above the tier's own width means the schedule was
/// authored wrongly. Tests fail loudly; production logs and clamps.
fn clamp_to_width(schedule: &AccountRateSchedule, in_tier: f64, width: f64) -> f64 {
    debug_assert!(
        in_tier <= width + TIER_TOLERANCE,
        "{}: in-tier amount {in_tier} exceeds tier width {width}",
        schedule.key
    );
    if in_tier > width + TIER_TOLERANCE {
        tracing::warn!(
            account = %schedule.key,
            in_tier,
            width,
            "in-tier amount exceeds tier width, clamping"
        );
        return width;
    }
    in_tier
}

fn tier_label(remark: &str, lower: f64, upper: Option<f64>) -> String {
    if !remark.is_empty() {
        return remark.to_string();
    }
    match upper {
        Some(upper) if lower == 0.0 => format!("First {upper:.0}"),
        Some(upper) => format!("Next {:.0} (up to {upper:.0})", upper - lower),
        None => format!("Above {lower:.0}"),
    }
}
