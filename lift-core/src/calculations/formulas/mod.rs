//! Service formulas and the single-scenario evaluation entry point.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use lift_core::calculations::evaluate;
//! use lift_core::{Baseline, EffectKind, KpiRow, Scenario, Service};
//!
//! let baseline = Baseline {
//!     monthly_traffic: dec!(20000),
//!     conversion_rate_pct: dec!(2.5),
//!     average_order_value: dec!(80),
//!     gross_margin_pct: dec!(55),
//!     monthly_ad_spend: dec!(10000),
//!     roas: dec!(3.0),
//!     ..Baseline::default()
//! };
//! let kpis = vec![
//!     KpiRow::new("conv", "Conversion", EffectKind::ConversionUplift, dec!(5)),
//!     KpiRow::new("aov", "AOV", EffectKind::AovUplift, dec!(7.5)),
//!     KpiRow::new("gm", "Margin", EffectKind::GrossMarginImprovement, dec!(1.0)),
//!     KpiRow::new("roas", "ROAS", EffectKind::RoasUplift, dec!(10)),
//!     KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, dec!(300)),
//! ];
//!
//! let outcome = evaluate(
//!     Service::Blueprint,
//!     Scenario::Base.multiplier(),
//!     &baseline,
//!     dec!(6000),
//!     &kpis,
//! );
//!
//! assert_eq!(outcome.monthly_gross_profit_lift, dec!(4264));
//! assert_eq!(outcome.roi, Some(dec!(7.528)));
//! ```

pub mod accelerator;
pub mod blueprint;
pub mod ops_dev_lab;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use accelerator::{AcceleratorBreakdown, AcceleratorFormula};
pub use blueprint::{BlueprintBreakdown, BlueprintFormula};
pub use ops_dev_lab::{OpsDevLabBreakdown, OpsDevLabFormula};

use crate::calculations::aggregator::{AggregateEffects, aggregate};
use crate::calculations::outcome::derive_outcome;
use crate::{Baseline, FinancialOutcome, KpiRow, Service};

/// Intermediate terms of whichever formula ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum ServiceBreakdown {
    Blueprint(BlueprintBreakdown),
    OpsDevLab(OpsDevLabBreakdown),
    Accelerator(AcceleratorBreakdown),
}

impl ServiceBreakdown {
    pub fn monthly_gross_profit(&self) -> Decimal {
        match self {
            Self::Blueprint(b) => b.monthly_gross_profit,
            Self::OpsDevLab(b) => b.monthly_gross_profit,
            Self::Accelerator(b) => b.monthly_gross_profit,
        }
    }

    /// Labelled gross-profit components, in the order they are summed.
    /// Costs are reported as negative amounts.
    pub fn components(&self) -> Vec<(&'static str, Decimal)> {
        match self {
            Self::Blueprint(b) => vec![
                ("Revenue growth", b.gp_from_revenue_growth),
                ("ROAS uplift", b.gp_from_roas_uplift),
                ("Churn reduction", b.gp_from_churn_reduction),
                ("Custom gross profit", b.custom_gross_profit),
                ("Implementation cost", -b.implementation_cost),
            ],
            Self::OpsDevLab(b) => vec![
                ("Hours saved", b.hours_savings_gp),
                ("Errors avoided", b.error_savings_gp),
                ("Added capacity", b.capacity_gp),
                ("Overtime reduced", b.overtime_savings_gp),
                ("Custom gross profit", b.custom_gross_profit),
                ("Implementation cost", -b.implementation_cost),
            ],
            Self::Accelerator(b) => vec![
                ("Revenue growth", b.gp_from_revenue_growth),
                ("Retention", b.gp_from_retention),
                ("ROAS uplift", b.gp_from_roas_uplift),
                ("Custom gross profit", b.custom_gross_profit),
                ("Implementation cost", -b.implementation_cost),
            ],
        }
    }
}

/// Everything produced by one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub service: Service,
    pub scenario_multiplier: Decimal,
    pub effects: AggregateEffects,
    pub breakdown: ServiceBreakdown,
    pub outcome: FinancialOutcome,
}

/// Runs the formula for `service` against already aggregated effects.
pub fn calculate_breakdown(
    service: Service,
    baseline: &Baseline,
    effects: &AggregateEffects,
) -> ServiceBreakdown {
    match service {
        Service::Blueprint => {
            ServiceBreakdown::Blueprint(BlueprintFormula::new(baseline).calculate(effects))
        }
        Service::OpsDevLab => {
            ServiceBreakdown::OpsDevLab(OpsDevLabFormula::new(baseline).calculate(effects))
        }
        Service::Accelerator => {
            ServiceBreakdown::Accelerator(AcceleratorFormula::new(baseline).calculate(effects))
        }
    }
}

/// Aggregates `kpis`, runs the formula for `service`, and derives the outcome.
pub fn evaluate_detailed(
    service: Service,
    scenario_multiplier: Decimal,
    baseline: &Baseline,
    fee: Decimal,
    kpis: &[KpiRow],
) -> Evaluation {
    let negative = baseline.negative_fields();
    if !negative.is_empty() {
        warn!(
            fields = ?negative,
            "baseline has negative values; results will reflect them unchanged"
        );
    }

    let effects = aggregate(kpis, scenario_multiplier);
    let breakdown = calculate_breakdown(service, baseline, &effects);
    let outcome = derive_outcome(breakdown.monthly_gross_profit(), fee);

    debug!(
        service = service.as_str(),
        multiplier = %scenario_multiplier,
        monthly = %outcome.monthly_gross_profit_lift,
        "evaluated service"
    );

    Evaluation {
        service,
        scenario_multiplier,
        effects,
        breakdown,
        outcome,
    }
}

/// Projected outcome of `service` under one scenario multiplier.
pub fn evaluate(
    service: Service,
    scenario_multiplier: Decimal,
    baseline: &Baseline,
    fee: Decimal,
    kpis: &[KpiRow],
) -> FinancialOutcome {
    evaluate_detailed(service, scenario_multiplier, baseline, fee, kpis).outcome
}
