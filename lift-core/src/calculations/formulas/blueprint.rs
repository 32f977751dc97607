//! Blueprint: revenue and margin growth.
//!
//! | Term | Formula |
//! |------|---------|
//! | revenue base | traffic × CR% × AOV |
//! | new gross margin | GM% + gross-margin pp |
//! | revenue growth GP | (revenue new − revenue base) × new GM% |
//! | ROAS GP | (ad spend × ROAS × (1 + ROAS uplift%) − ad spend × ROAS) × new GM% |
//! | churn GP | subscribers × churn pp × (new AOV × new GM%) |
//! | monthly GP | growth + ROAS + churn + custom GP − implementation cost |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Baseline;
use crate::calculations::aggregator::AggregateEffects;
use crate::calculations::common::{
    gp_from_revenue_growth, gp_from_roas_uplift, pct, revenue_base, saturating_sum, uplift_factor,
};

/// Every intermediate term of the Blueprint formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintBreakdown {
    pub revenue_base: Decimal,
    pub revenue_new: Decimal,
    /// Gross margin after the improvement, in percent.
    pub new_gross_margin_pct: Decimal,
    pub new_average_order_value: Decimal,
    pub gp_from_revenue_growth: Decimal,
    pub gp_from_roas_uplift: Decimal,
    pub gp_from_churn_reduction: Decimal,
    pub custom_gross_profit: Decimal,
    pub implementation_cost: Decimal,
    pub monthly_gross_profit: Decimal,
}

/// Calculator for the Blueprint service.
#[derive(Debug, Clone)]
pub struct BlueprintFormula<'a> {
    baseline: &'a Baseline,
}

impl<'a> BlueprintFormula<'a> {
    pub fn new(baseline: &'a Baseline) -> Self {
        Self { baseline }
    }

    pub fn calculate(
        &self,
        effects: &AggregateEffects,
    ) -> BlueprintBreakdown {
        let new_gross_margin_pct = self.new_gross_margin_pct(effects.gross_margin_pp);
        let new_average_order_value = self.new_average_order_value(effects.aov_uplift_pct);

        let (revenue_new, gp_from_revenue_growth) = gp_from_revenue_growth(
            self.baseline,
            effects.conversion_uplift_pct,
            effects.aov_uplift_pct,
            new_gross_margin_pct,
        );
        let gp_from_roas_uplift =
            gp_from_roas_uplift(self.baseline, effects.roas_uplift_pct, new_gross_margin_pct);
        let gp_from_churn_reduction = self.churn_reduction_gp(
            effects.churn_reduction_pp,
            new_average_order_value,
            new_gross_margin_pct,
        );

        let monthly_gross_profit = saturating_sum([
            gp_from_revenue_growth,
            gp_from_roas_uplift,
            gp_from_churn_reduction,
            effects.custom_gross_profit,
            -effects.implementation_cost,
        ]);

        BlueprintBreakdown {
            revenue_base: revenue_base(self.baseline),
            revenue_new,
            new_gross_margin_pct,
            new_average_order_value,
            gp_from_revenue_growth,
            gp_from_roas_uplift,
            gp_from_churn_reduction,
            custom_gross_profit: effects.custom_gross_profit,
            implementation_cost: effects.implementation_cost,
            monthly_gross_profit,
        }
    }

    fn new_gross_margin_pct(
        &self,
        gross_margin_pp: Decimal,
    ) -> Decimal {
        self.baseline.gross_margin_pct.saturating_add(gross_margin_pp)
    }

    fn new_average_order_value(
        &self,
        aov_uplift_pct: Decimal,
    ) -> Decimal {
        self.baseline
            .average_order_value
            .saturating_mul(uplift_factor(aov_uplift_pct))
    }

    /// Retained subscribers valued at the improved per-account gross profit.
    fn churn_reduction_gp(
        &self,
        churn_reduction_pp: Decimal,
        new_average_order_value: Decimal,
        new_gross_margin_pct: Decimal,
    ) -> Decimal {
        let gross_profit_per_order = new_average_order_value.saturating_mul(pct(new_gross_margin_pct));
        self.baseline
            .subscribers
            .saturating_mul(pct(churn_reduction_pp))
            .saturating_mul(gross_profit_per_order)
    }
}
