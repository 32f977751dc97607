use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Projected return of a service engagement.
///
/// `payback_months` and `roi` are `None` when they cannot be computed:
/// payback when monthly lift is not positive, ROI when the fee is not
/// positive. Callers must show a placeholder for `None`, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialOutcome {
    pub monthly_gross_profit_lift: Decimal,
    pub annual_gross_profit_lift: Decimal,
    pub payback_months: Option<Decimal>,
    /// Net return as a ratio of the fee (7.528 = 752.8%).
    pub roi: Option<Decimal>,
}

impl FinancialOutcome {
    /// ROI expressed in percent; `None` also when the percentage is out of
    /// the `Decimal` range.
    pub fn roi_percent(&self) -> Option<Decimal> {
        self.roi.and_then(|roi| roi.checked_mul(Decimal::ONE_HUNDRED))
    }
}
