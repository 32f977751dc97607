use serde::{Deserialize, Serialize};

/// Unit a KPI value is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectUnit {
    /// Relative change, e.g. `5` means +5% of the baseline figure.
    Percent,
    /// Additive change to a percentage, e.g. `1` means +1 pp.
    PercentagePoints,
    HoursPerWeek,
    HoursPerMonth,
    /// Flat monthly currency amount.
    Currency,
}

impl EffectUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::PercentagePoints => "pp",
            Self::HoursPerWeek => "h/wk",
            Self::HoursPerMonth => "h/mo",
            Self::Currency => "$/mo",
        }
    }
}

/// The closed set of effects a KPI row can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    #[serde(rename = "conv_pct")]
    ConversionUplift,
    #[serde(rename = "aov_pct")]
    AovUplift,
    #[serde(rename = "gm_pp")]
    GrossMarginImprovement,
    #[serde(rename = "roas_pct")]
    RoasUplift,
    #[serde(rename = "churn_pp")]
    ChurnReduction,
    #[serde(rename = "retention_pct")]
    RetentionUplift,
    #[serde(rename = "hours_per_week")]
    HoursSavedPerWeek,
    #[serde(rename = "error_reduction_pct")]
    ErrorReduction,
    #[serde(rename = "capacity_pct")]
    CapacityIncrease,
    #[serde(rename = "utilization_pct")]
    UtilizationOfAddedCapacity,
    #[serde(rename = "overtime_hours")]
    OvertimeHoursReduced,
    #[serde(rename = "impl_cost")]
    MonthlyImplementationCost,
    #[serde(rename = "custom_gp")]
    CustomFlatGrossProfit,
}

impl EffectKind {
    pub const ALL: [EffectKind; 13] = [
        Self::ConversionUplift,
        Self::AovUplift,
        Self::GrossMarginImprovement,
        Self::RoasUplift,
        Self::ChurnReduction,
        Self::RetentionUplift,
        Self::HoursSavedPerWeek,
        Self::ErrorReduction,
        Self::CapacityIncrease,
        Self::UtilizationOfAddedCapacity,
        Self::OvertimeHoursReduced,
        Self::MonthlyImplementationCost,
        Self::CustomFlatGrossProfit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConversionUplift => "conv_pct",
            Self::AovUplift => "aov_pct",
            Self::GrossMarginImprovement => "gm_pp",
            Self::RoasUplift => "roas_pct",
            Self::ChurnReduction => "churn_pp",
            Self::RetentionUplift => "retention_pct",
            Self::HoursSavedPerWeek => "hours_per_week",
            Self::ErrorReduction => "error_reduction_pct",
            Self::CapacityIncrease => "capacity_pct",
            Self::UtilizationOfAddedCapacity => "utilization_pct",
            Self::OvertimeHoursReduced => "overtime_hours",
            Self::MonthlyImplementationCost => "impl_cost",
            Self::CustomFlatGrossProfit => "custom_gp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ConversionUplift => "Conversion uplift",
            Self::AovUplift => "AOV / ARPU uplift",
            Self::GrossMarginImprovement => "Gross margin improvement",
            Self::RoasUplift => "ROAS uplift",
            Self::ChurnReduction => "Churn reduction",
            Self::RetentionUplift => "Retention uplift",
            Self::HoursSavedPerWeek => "Hours saved per week",
            Self::ErrorReduction => "Error reduction",
            Self::CapacityIncrease => "Capacity increase",
            Self::UtilizationOfAddedCapacity => "Utilization of added capacity",
            Self::OvertimeHoursReduced => "Overtime hours reduced per month",
            Self::MonthlyImplementationCost => "Monthly implementation cost",
            Self::CustomFlatGrossProfit => "Custom flat gross profit",
        }
    }

    pub fn unit(&self) -> EffectUnit {
        match self {
            Self::ConversionUplift
            | Self::AovUplift
            | Self::RoasUplift
            | Self::RetentionUplift
            | Self::ErrorReduction
            | Self::CapacityIncrease
            | Self::UtilizationOfAddedCapacity => EffectUnit::Percent,
            Self::GrossMarginImprovement | Self::ChurnReduction => EffectUnit::PercentagePoints,
            Self::HoursSavedPerWeek => EffectUnit::HoursPerWeek,
            Self::OvertimeHoursReduced => EffectUnit::HoursPerMonth,
            Self::MonthlyImplementationCost | Self::CustomFlatGrossProfit => EffectUnit::Currency,
        }
    }

    /// Whether the aggregator divides this effect by 100 so formulas receive
    /// a fraction instead of a percentage.
    pub fn normalizes_to_fraction(&self) -> bool {
        matches!(
            self,
            Self::ErrorReduction | Self::CapacityIncrease | Self::UtilizationOfAddedCapacity
        )
    }
}
