//! Accelerator: growth and retention at the existing gross margin.
//!
//! Gross-margin improvement and churn reduction are not part of this
//! service; rows with those effects are aggregated but unused here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Baseline;
use crate::calculations::aggregator::AggregateEffects;
use crate::calculations::common::{
    gp_from_revenue_growth, gp_from_roas_uplift, pct, revenue_base, saturating_sum,
};

/// Every intermediate term of the Accelerator formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorBreakdown {
    pub revenue_base: Decimal,
    pub revenue_new: Decimal,
    pub gp_from_revenue_growth: Decimal,
    pub gp_from_retention: Decimal,
    pub gp_from_roas_uplift: Decimal,
    pub custom_gross_profit: Decimal,
    pub implementation_cost: Decimal,
    pub monthly_gross_profit: Decimal,
}

/// Calculator for the Accelerator service.
#[derive(Debug, Clone)]
pub struct AcceleratorFormula<'a> {
    baseline: &'a Baseline,
}

impl<'a> AcceleratorFormula<'a> {
    pub fn new(baseline: &'a Baseline) -> Self {
        Self { baseline }
    }

    pub fn calculate(
        &self,
        effects: &AggregateEffects,
    ) -> AcceleratorBreakdown {
        let margin_pct = self.baseline.gross_margin_pct;
        let revenue_base = revenue_base(self.baseline);

        let (revenue_new, gp_from_revenue_growth) = gp_from_revenue_growth(
            self.baseline,
            effects.conversion_uplift_pct,
            effects.aov_uplift_pct,
            margin_pct,
        );
        let gp_from_retention = revenue_base
            .saturating_mul(pct(effects.retention_uplift_pct))
            .saturating_mul(pct(margin_pct));
        let gp_from_roas_uplift =
            gp_from_roas_uplift(self.baseline, effects.roas_uplift_pct, margin_pct);

        let monthly_gross_profit = saturating_sum([
            gp_from_revenue_growth,
            gp_from_retention,
            gp_from_roas_uplift,
            effects.custom_gross_profit,
            -effects.implementation_cost,
        ]);

        AcceleratorBreakdown {
            revenue_base,
            revenue_new,
            gp_from_revenue_growth,
            gp_from_retention,
            gp_from_roas_uplift,
            custom_gross_profit: effects.custom_gross_profit,
            implementation_cost: effects.implementation_cost,
            monthly_gross_profit,
        }
    }
}
