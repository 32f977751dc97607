use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A business's current-state metrics.
///
/// Nothing here is validated. Negative or implausible values flow through the
/// formulas unchanged; [`Baseline::negative_fields`] lets callers report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Baseline {
    /// Monthly visitors or leads.
    pub monthly_traffic: Decimal,
    /// Conversion rate in percent (2.5 = 2.5%).
    pub conversion_rate_pct: Decimal,
    /// Average order value, or ARPU for subscription businesses.
    pub average_order_value: Decimal,
    /// Gross margin in percent.
    pub gross_margin_pct: Decimal,
    pub subscribers: Decimal,
    /// Monthly churn rate in percent.
    pub monthly_churn_pct: Decimal,
    pub monthly_ad_spend: Decimal,
    /// Return on ad spend as a ratio (3.0 = $3 revenue per $1 spent).
    pub roas: Decimal,
    /// Fully loaded labor cost per hour.
    pub hourly_rate: Decimal,
    pub wasted_hours_per_week: Decimal,
    pub monthly_errors: Decimal,
    pub cost_per_error: Decimal,
}

impl Baseline {
    /// Field names in display order, as used in files and on the command line.
    pub const FIELDS: [&'static str; 12] = [
        "monthly_traffic",
        "conversion_rate_pct",
        "average_order_value",
        "gross_margin_pct",
        "subscribers",
        "monthly_churn_pct",
        "monthly_ad_spend",
        "roas",
        "hourly_rate",
        "wasted_hours_per_week",
        "monthly_errors",
        "cost_per_error",
    ];

    /// Every field with its name, in [`Baseline::FIELDS`] order.
    pub fn fields(&self) -> [(&'static str, Decimal); 12] {
        [
            ("monthly_traffic", self.monthly_traffic),
            ("conversion_rate_pct", self.conversion_rate_pct),
            ("average_order_value", self.average_order_value),
            ("gross_margin_pct", self.gross_margin_pct),
            ("subscribers", self.subscribers),
            ("monthly_churn_pct", self.monthly_churn_pct),
            ("monthly_ad_spend", self.monthly_ad_spend),
            ("roas", self.roas),
            ("hourly_rate", self.hourly_rate),
            ("wasted_hours_per_week", self.wasted_hours_per_week),
            ("monthly_errors", self.monthly_errors),
            ("cost_per_error", self.cost_per_error),
        ]
    }

    pub fn field_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut Decimal> {
        let field = match name {
            "monthly_traffic" => &mut self.monthly_traffic,
            "conversion_rate_pct" => &mut self.conversion_rate_pct,
            "average_order_value" => &mut self.average_order_value,
            "gross_margin_pct" => &mut self.gross_margin_pct,
            "subscribers" => &mut self.subscribers,
            "monthly_churn_pct" => &mut self.monthly_churn_pct,
            "monthly_ad_spend" => &mut self.monthly_ad_spend,
            "roas" => &mut self.roas,
            "hourly_rate" => &mut self.hourly_rate,
            "wasted_hours_per_week" => &mut self.wasted_hours_per_week,
            "monthly_errors" => &mut self.monthly_errors,
            "cost_per_error" => &mut self.cost_per_error,
            _ => return None,
        };
        Some(field)
    }

    /// Names of every field holding a negative value.
    pub fn negative_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_sign_negative() && !value.is_zero())
            .map(|(name, _)| name)
            .collect()
    }
}
