//! Scenario scaling policy.
//!
//! A scenario multiplier stretches optimistic or pessimistic framing across
//! the KPI assumptions. Costs and the utilization assumption are not part of
//! that framing and stay fixed. Both the single-scenario path and the sweep
//! go through [`scaled_value`], so they always agree.

use rust_decimal::Decimal;

use crate::EffectKind;

/// Whether scenario multipliers apply to `effect`.
pub fn is_scenario_scalable(effect: EffectKind) -> bool {
    match effect {
        EffectKind::ConversionUplift
        | EffectKind::AovUplift
        | EffectKind::GrossMarginImprovement
        | EffectKind::RoasUplift
        | EffectKind::ChurnReduction
        | EffectKind::RetentionUplift
        | EffectKind::HoursSavedPerWeek
        | EffectKind::ErrorReduction
        | EffectKind::CapacityIncrease
        | EffectKind::OvertimeHoursReduced
        | EffectKind::CustomFlatGrossProfit => true,
        EffectKind::UtilizationOfAddedCapacity | EffectKind::MonthlyImplementationCost => false,
    }
}

/// `value` scaled by `multiplier` when `effect` is scalable, else unchanged.
pub fn scaled_value(
    effect: EffectKind,
    value: Decimal,
    multiplier: Decimal,
) -> Decimal {
    if is_scenario_scalable(effect) {
        value.saturating_mul(multiplier)
    } else {
        value
    }
}
