//! Shared terms used by more than one service formula.
//!
//! Percentages arrive in percent form (2.5 = 2.5%) and are converted at the
//! point of use, matching the way the formulas are written on paper.
//!
//! Products, sums and quotients saturate at the `Decimal` bounds, so every
//! formula returns a value for any input.

use rust_decimal::Decimal;

use crate::Baseline;

/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use lift_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1.405)), dec!(1.41));
/// assert_eq!(round_half_up(dec!(-1.405)), dec!(-1.41));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator`, saturating at [`Decimal::MAX`] or
/// [`Decimal::MIN`] when the quotient is out of range. A zero denominator
/// yields zero.
pub fn saturating_div(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Sum of `terms`, saturating at the `Decimal` bounds.
pub fn saturating_sum<I>(terms: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    terms
        .into_iter()
        .fold(Decimal::ZERO, |total, term| total.saturating_add(term))
}

/// Converts a percentage to a fraction (`55` → `0.55`).
pub fn pct(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Multiplier for a relative uplift (`5` → `1.05`).
pub fn uplift_factor(uplift_pct: Decimal) -> Decimal {
    Decimal::ONE.saturating_add(pct(uplift_pct))
}

/// Monthly revenue before any improvement: traffic × conversion × AOV.
pub fn revenue_base(baseline: &Baseline) -> Decimal {
    baseline
        .monthly_traffic
        .saturating_mul(pct(baseline.conversion_rate_pct))
        .saturating_mul(baseline.average_order_value)
}

/// Gross profit from conversion and AOV uplift, valued at `margin_pct`.
///
/// Returns `(revenue_new, gross_profit)`.
pub fn gp_from_revenue_growth(
    baseline: &Baseline,
    conversion_uplift_pct: Decimal,
    aov_uplift_pct: Decimal,
    margin_pct: Decimal,
) -> (Decimal, Decimal) {
    let new_conversion_rate = baseline
        .conversion_rate_pct
        .saturating_mul(uplift_factor(conversion_uplift_pct));
    let new_aov = baseline
        .average_order_value
        .saturating_mul(uplift_factor(aov_uplift_pct));
    let revenue_new = baseline
        .monthly_traffic
        .saturating_mul(pct(new_conversion_rate))
        .saturating_mul(new_aov);

    let gross_profit = revenue_new
        .saturating_sub(revenue_base(baseline))
        .saturating_mul(pct(margin_pct));
    (revenue_new, gross_profit)
}

/// Gross profit from the extra ad revenue a ROAS uplift produces.
pub fn gp_from_roas_uplift(
    baseline: &Baseline,
    roas_uplift_pct: Decimal,
    margin_pct: Decimal,
) -> Decimal {
    let ad_revenue = baseline.monthly_ad_spend.saturating_mul(baseline.roas);
    let ad_revenue_new = ad_revenue.saturating_mul(uplift_factor(roas_uplift_pct));

    ad_revenue_new
        .saturating_sub(ad_revenue)
        .saturating_mul(pct(margin_pct))
}
