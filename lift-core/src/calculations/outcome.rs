//! Final step shared by every service formula.

use rust_decimal::Decimal;
use tracing::debug;

use crate::FinancialOutcome;
use crate::calculations::common::MONTHS_PER_YEAR;

/// Derives annual lift, payback and ROI from monthly gross profit and fee.
///
/// - payback is `fee / monthly` only while monthly gross profit is positive
/// - ROI is `(annual - fee) / fee` only while the fee is positive
///
/// A payback or ROI whose quotient falls outside the `Decimal` range is
/// undefined as well. An annual lift beyond that range saturates and
/// leaves ROI undefined.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use lift_core::calculations::derive_outcome;
///
/// let outcome = derive_outcome(dec!(4264), dec!(6000));
///
/// assert_eq!(outcome.annual_gross_profit_lift, dec!(51168));
/// assert_eq!(outcome.roi, Some(dec!(7.528)));
///
/// let never = derive_outcome(dec!(-50), dec!(0));
/// assert_eq!(never.payback_months, None);
/// assert_eq!(never.roi, None);
/// ```
pub fn derive_outcome(
    monthly_gross_profit: Decimal,
    fee: Decimal,
) -> FinancialOutcome {
    let annual_exact = monthly_gross_profit.checked_mul(MONTHS_PER_YEAR);
    let annual_gross_profit =
        annual_exact.unwrap_or_else(|| monthly_gross_profit.saturating_mul(MONTHS_PER_YEAR));

    let payback_months = if monthly_gross_profit > Decimal::ZERO {
        let payback = fee.checked_div(monthly_gross_profit);
        if payback.is_none() {
            debug!(
                monthly = %monthly_gross_profit,
                fee = %fee,
                "payback exceeds the decimal range; payback undefined"
            );
        }
        payback
    } else {
        debug!(
            monthly = %monthly_gross_profit,
            "monthly gross profit is not positive; payback undefined"
        );
        None
    };

    let roi = if fee > Decimal::ZERO {
        let roi = annual_exact
            .and_then(|annual| annual.checked_sub(fee))
            .and_then(|net| net.checked_div(fee));
        if roi.is_none() {
            debug!(
                annual = %annual_gross_profit,
                fee = %fee,
                "ROI exceeds the decimal range; ROI undefined"
            );
        }
        roi
    } else {
        debug!(fee = %fee, "fee is not positive; ROI undefined");
        None
    };

    FinancialOutcome {
        monthly_gross_profit_lift: monthly_gross_profit,
        annual_gross_profit_lift: annual_gross_profit,
        payback_months,
        roi,
    }
}
