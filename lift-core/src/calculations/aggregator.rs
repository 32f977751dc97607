//! Reduces KPI rows into one magnitude per effect kind.
//!
//! # Units
//!
//! | Bucket | Unit passed to formulas |
//! |--------|-------------------------|
//! | conversion, AOV, ROAS, retention | percent |
//! | gross margin, churn | percentage points |
//! | error reduction, capacity, utilization | fraction (entered as percent, divided by 100 here) |
//! | hours saved | hours per week |
//! | overtime | hours per month |
//! | implementation cost, custom GP | currency per month |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use lift_core::calculations::aggregate;
//! use lift_core::{EffectKind, KpiRow};
//!
//! let rows = vec![
//!     KpiRow::new("organic", "Organic conversion", EffectKind::ConversionUplift, dec!(3)),
//!     KpiRow::new("paid", "Paid conversion", EffectKind::ConversionUplift, dec!(2)),
//!     KpiRow::new("cap", "Line capacity", EffectKind::CapacityIncrease, dec!(20)),
//! ];
//!
//! let effects = aggregate(&rows, dec!(1.0));
//!
//! assert_eq!(effects.conversion_uplift_pct, dec!(5));
//! assert_eq!(effects.capacity_increase, dec!(0.20));
//! assert_eq!(effects.utilization, dec!(0.6)); // nothing configured
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::scaler::scaled_value;
use crate::{EffectKind, KpiRow};

/// Utilization assumed when no enabled row supplies one.
pub const DEFAULT_UTILIZATION: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Summed KPI effects, one field per [`EffectKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateEffects {
    pub conversion_uplift_pct: Decimal,
    pub aov_uplift_pct: Decimal,
    pub gross_margin_pp: Decimal,
    pub roas_uplift_pct: Decimal,
    pub churn_reduction_pp: Decimal,
    pub retention_uplift_pct: Decimal,
    pub hours_saved_per_week: Decimal,
    /// Fraction of monthly errors avoided.
    pub error_reduction: Decimal,
    /// Fractional increase in order-handling capacity.
    pub capacity_increase: Decimal,
    /// Fraction of added capacity actually used, always within `[0, 1]`.
    pub utilization: Decimal,
    pub overtime_hours_reduced: Decimal,
    pub implementation_cost: Decimal,
    pub custom_gross_profit: Decimal,
}

impl AggregateEffects {
    fn bucket_mut(
        &mut self,
        effect: EffectKind,
    ) -> &mut Decimal {
        match effect {
            EffectKind::ConversionUplift => &mut self.conversion_uplift_pct,
            EffectKind::AovUplift => &mut self.aov_uplift_pct,
            EffectKind::GrossMarginImprovement => &mut self.gross_margin_pp,
            EffectKind::RoasUplift => &mut self.roas_uplift_pct,
            EffectKind::ChurnReduction => &mut self.churn_reduction_pp,
            EffectKind::RetentionUplift => &mut self.retention_uplift_pct,
            EffectKind::HoursSavedPerWeek => &mut self.hours_saved_per_week,
            EffectKind::ErrorReduction => &mut self.error_reduction,
            EffectKind::CapacityIncrease => &mut self.capacity_increase,
            EffectKind::UtilizationOfAddedCapacity => &mut self.utilization,
            EffectKind::OvertimeHoursReduced => &mut self.overtime_hours_reduced,
            EffectKind::MonthlyImplementationCost => &mut self.implementation_cost,
            EffectKind::CustomFlatGrossProfit => &mut self.custom_gross_profit,
        }
    }

    /// The aggregated magnitude for `effect`.
    pub fn get(
        &self,
        effect: EffectKind,
    ) -> Decimal {
        match effect {
            EffectKind::ConversionUplift => self.conversion_uplift_pct,
            EffectKind::AovUplift => self.aov_uplift_pct,
            EffectKind::GrossMarginImprovement => self.gross_margin_pp,
            EffectKind::RoasUplift => self.roas_uplift_pct,
            EffectKind::ChurnReduction => self.churn_reduction_pp,
            EffectKind::RetentionUplift => self.retention_uplift_pct,
            EffectKind::HoursSavedPerWeek => self.hours_saved_per_week,
            EffectKind::ErrorReduction => self.error_reduction,
            EffectKind::CapacityIncrease => self.capacity_increase,
            EffectKind::UtilizationOfAddedCapacity => self.utilization,
            EffectKind::OvertimeHoursReduced => self.overtime_hours_reduced,
            EffectKind::MonthlyImplementationCost => self.implementation_cost,
            EffectKind::CustomFlatGrossProfit => self.custom_gross_profit,
        }
    }
}

/// Sums enabled KPI rows per effect kind under `scenario_multiplier`.
///
/// Disabled rows are skipped. An accumulated utilization of exactly zero
/// means "not configured" and becomes [`DEFAULT_UTILIZATION`]; any other
/// utilization is clamped to `[0, 1]`.
pub fn aggregate<'a, I>(
    kpis: I,
    scenario_multiplier: Decimal,
) -> AggregateEffects
where
    I: IntoIterator<Item = &'a KpiRow>,
{
    let mut effects = AggregateEffects::default();

    for row in kpis.into_iter().filter(|row| row.enabled) {
        let mut value = scaled_value(row.effect, row.value, scenario_multiplier);
        if row.effect.normalizes_to_fraction() {
            value /= Decimal::ONE_HUNDRED;
        }
        let bucket = effects.bucket_mut(row.effect);
        *bucket = bucket.saturating_add(value);
    }

    effects.utilization = if effects.utilization.is_zero() {
        DEFAULT_UTILIZATION
    } else {
        effects.utilization.clamp(Decimal::ZERO, Decimal::ONE)
    };

    debug!(
        multiplier = %scenario_multiplier,
        utilization = %effects.utilization,
        "aggregated KPI effects"
    );
    effects
}
