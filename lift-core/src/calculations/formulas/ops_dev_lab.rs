//! Operations Dev Lab: efficiency and capacity.
//!
//! | Term | Formula |
//! |------|---------|
//! | hours GP | hours saved/week × hourly rate × 4.33 |
//! | error GP | monthly errors × error reduction × cost per error |
//! | orders base | revenue base ÷ AOV (0 when AOV is 0) |
//! | added orders | orders base × capacity increase × utilization |
//! | capacity GP | added orders × (AOV × GM%) |
//! | overtime GP | overtime hours reduced × hourly rate |
//! | monthly GP | hours + errors + capacity + overtime + custom GP − implementation cost |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Baseline;
use crate::calculations::aggregator::AggregateEffects;
use crate::calculations::common::{
    WEEKS_PER_MONTH, pct, revenue_base, saturating_div, saturating_sum,
};

/// Every intermediate term of the Operations Dev Lab formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsDevLabBreakdown {
    pub hours_savings_gp: Decimal,
    pub error_savings_gp: Decimal,
    pub orders_base: Decimal,
    pub added_orders: Decimal,
    pub capacity_gp: Decimal,
    pub overtime_savings_gp: Decimal,
    pub custom_gross_profit: Decimal,
    pub implementation_cost: Decimal,
    pub monthly_gross_profit: Decimal,
}

/// Calculator for the Operations Dev Lab service.
#[derive(Debug, Clone)]
pub struct OpsDevLabFormula<'a> {
    baseline: &'a Baseline,
}

impl<'a> OpsDevLabFormula<'a> {
    pub fn new(baseline: &'a Baseline) -> Self {
        Self { baseline }
    }

    pub fn calculate(
        &self,
        effects: &AggregateEffects,
    ) -> OpsDevLabBreakdown {
        let hours_savings_gp = self.hours_savings_gp(effects.hours_saved_per_week);
        let error_savings_gp = self.error_savings_gp(effects.error_reduction);
        let orders_base = self.orders_base();
        let added_orders = orders_base
            .saturating_mul(effects.capacity_increase)
            .saturating_mul(effects.utilization);
        let capacity_gp = self.capacity_gp(added_orders);
        let overtime_savings_gp = effects
            .overtime_hours_reduced
            .saturating_mul(self.baseline.hourly_rate);

        let monthly_gross_profit = saturating_sum([
            hours_savings_gp,
            error_savings_gp,
            capacity_gp,
            overtime_savings_gp,
            effects.custom_gross_profit,
            -effects.implementation_cost,
        ]);

        OpsDevLabBreakdown {
            hours_savings_gp,
            error_savings_gp,
            orders_base,
            added_orders,
            capacity_gp,
            overtime_savings_gp,
            custom_gross_profit: effects.custom_gross_profit,
            implementation_cost: effects.implementation_cost,
            monthly_gross_profit,
        }
    }

    fn hours_savings_gp(
        &self,
        hours_saved_per_week: Decimal,
    ) -> Decimal {
        hours_saved_per_week
            .saturating_mul(self.baseline.hourly_rate)
            .saturating_mul(WEEKS_PER_MONTH)
    }

    fn error_savings_gp(
        &self,
        error_reduction: Decimal,
    ) -> Decimal {
        self.baseline
            .monthly_errors
            .saturating_mul(error_reduction)
            .saturating_mul(self.baseline.cost_per_error)
    }

    /// Monthly order count implied by the baseline revenue.
    fn orders_base(&self) -> Decimal {
        saturating_div(revenue_base(self.baseline), self.baseline.average_order_value)
    }

    fn capacity_gp(
        &self,
        added_orders: Decimal,
    ) -> Decimal {
        let gross_profit_per_order = self
            .baseline
            .average_order_value
            .saturating_mul(pct(self.baseline.gross_margin_pct));
        added_orders.saturating_mul(gross_profit_per_order)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn ops_baseline() -> Baseline {
        Baseline {
            monthly_traffic: dec!(20000),
            conversion_rate_pct: dec!(2.5),
            average_order_value: dec!(80),
            gross_margin_pct: dec!(55),
            hourly_rate: dec!(45),
            wasted_hours_per_week: dec!(30),
            monthly_errors: dec!(40),
            cost_per_error: dec!(25),
            ..Baseline::default()
        }
    }

    #[test]
    fn hours_savings_uses_weeks_per_month() {
        let baseline = ops_baseline();
        let formula = OpsDevLabFormula::new(&baseline);

        // 10 × 45 × 4.33
        assert_eq!(formula.hours_savings_gp(dec!(10)), dec!(1948.50));
    }

    #[test]
    fn error_savings_uses_fraction() {
        let baseline = ops_baseline();
        let formula = OpsDevLabFormula::new(&baseline);

        // 40 × 0.5 × 25
        assert_eq!(formula.error_savings_gp(dec!(0.5)), dec!(500));
    }

    #[test]
    fn orders_base_divides_revenue_by_aov() {
        let baseline = ops_baseline();
        let formula = OpsDevLabFormula::new(&baseline);

        assert_eq!(formula.orders_base(), dec!(500));
    }

    #[test]
    fn orders_base_is_zero_without_aov() {
        let baseline = Baseline {
            average_order_value: dec!(0),
            ..ops_baseline()
        };
        let formula = OpsDevLabFormula::new(&baseline);

        assert_eq!(formula.orders_base(), dec!(0));
    }

    #[test]
    fn calculate_combines_all_terms() {
        let baseline = ops_baseline();
        let formula = OpsDevLabFormula::new(&baseline);
        let effects = AggregateEffects {
            hours_saved_per_week: dec!(10),
            error_reduction: dec!(0.5),
            capacity_increase: dec!(0.2),
            utilization: dec!(0.6),
            overtime_hours_reduced: dec!(20),
            custom_gross_profit: dec!(100),
            implementation_cost: dec!(250),
            ..AggregateEffects::default()
        };

        let result = formula.calculate(&effects);

        // 500 orders × 0.2 × 0.6 = 60 added orders × (80 × 55%) = 2640
        assert_eq!(result.added_orders, dec!(60));
        assert_eq!(result.capacity_gp, dec!(2640));
        assert_eq!(result.overtime_savings_gp, dec!(900));
        // 1948.50 + 500 + 2640 + 900 + 100 − 250
        assert_eq!(result.monthly_gross_profit, dec!(5838.50));
    }

    #[test]
    fn default_utilization_contributes_nothing_without_capacity() {
        let baseline = ops_baseline();
        let formula = OpsDevLabFormula::new(&baseline);
        let effects = AggregateEffects {
            utilization: dec!(0.6),
            ..AggregateEffects::default()
        };

        let result = formula.calculate(&effects);

        assert_eq!(result.added_orders, dec!(0));
        assert_eq!(result.monthly_gross_profit, dec!(0));
    }
}
