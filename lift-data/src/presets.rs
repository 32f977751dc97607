//! Built-in starting configurations.

use lift_core::{
    Baseline, EffectKind, FeeSchedule, KpiList, KpiRow, Preset, PresetRepository, ServiceKpis,
    StoreError,
};
use rust_decimal::Decimal;
use tracing::info;

/// Name of the preset a fresh session starts from.
pub const DEFAULT_PRESET: &str = "dtc";

fn d(
    num: i64,
    scale: u32,
) -> Decimal {
    Decimal::new(num, scale)
}

fn list(rows: Vec<KpiRow>) -> KpiList {
    let mut list = KpiList::new();
    for row in rows {
        // Ids below are literals and distinct per list.
        let _ = list.push(row);
    }
    list
}

/// Direct-to-consumer store.
pub fn dtc() -> Preset {
    Preset {
        name: "dtc".to_string(),
        description: "Direct-to-consumer online store".to_string(),
        baseline: Baseline {
            monthly_traffic: d(20000, 0),
            conversion_rate_pct: d(25, 1),
            average_order_value: d(80, 0),
            gross_margin_pct: d(55, 0),
            subscribers: Decimal::ZERO,
            monthly_churn_pct: Decimal::ZERO,
            monthly_ad_spend: d(10000, 0),
            roas: d(30, 1),
            hourly_rate: d(45, 0),
            wasted_hours_per_week: d(30, 0),
            monthly_errors: d(40, 0),
            cost_per_error: d(25, 0),
        },
        fees: FeeSchedule {
            blueprint: d(6000, 0),
            ops_dev_lab: d(8000, 0),
            accelerator: d(12000, 0),
        },
        kpis: ServiceKpis {
            blueprint: list(vec![
                KpiRow::new("conv", "Checkout redesign", EffectKind::ConversionUplift, d(5, 0)),
                KpiRow::new("aov", "Bundles and upsells", EffectKind::AovUplift, d(75, 1)),
                KpiRow::new("gm", "Supplier renegotiation", EffectKind::GrossMarginImprovement, d(10, 1)),
                KpiRow::new("roas", "Creative refresh", EffectKind::RoasUplift, d(10, 0)),
                KpiRow::new("churn", "Subscription saves", EffectKind::ChurnReduction, d(10, 1)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(300, 0)),
            ]),
            ops_dev_lab: list(vec![
                KpiRow::new("hours", "Order automation", EffectKind::HoursSavedPerWeek, d(10, 0)),
                KpiRow::new("errors", "Pick/pack checks", EffectKind::ErrorReduction, d(50, 0)),
                KpiRow::new("capacity", "Throughput", EffectKind::CapacityIncrease, d(20, 0)),
                KpiRow::new("overtime", "Shift planning", EffectKind::OvertimeHoursReduced, d(20, 0)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(250, 0)),
            ]),
            accelerator: list(vec![
                KpiRow::new("conv", "Landing pages", EffectKind::ConversionUplift, d(8, 0)),
                KpiRow::new("aov", "Offer testing", EffectKind::AovUplift, d(5, 0)),
                KpiRow::new("retention", "Lifecycle email", EffectKind::RetentionUplift, d(3, 0)),
                KpiRow::new("roas", "Channel mix", EffectKind::RoasUplift, d(15, 0)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(500, 0)),
            ]),
        },
    }
}

/// Subscription software business.
pub fn saas() -> Preset {
    Preset {
        name: "saas".to_string(),
        description: "Subscription software with monthly billing".to_string(),
        baseline: Baseline {
            monthly_traffic: d(50000, 0),
            conversion_rate_pct: d(2, 0),
            average_order_value: d(50, 0),
            gross_margin_pct: d(80, 0),
            subscribers: d(4000, 0),
            monthly_churn_pct: d(4, 0),
            monthly_ad_spend: d(5000, 0),
            roas: d(2, 0),
            hourly_rate: d(60, 0),
            wasted_hours_per_week: d(15, 0),
            monthly_errors: d(10, 0),
            cost_per_error: d(120, 0),
        },
        fees: FeeSchedule {
            blueprint: d(9000, 0),
            ops_dev_lab: d(7500, 0),
            accelerator: d(15000, 0),
        },
        kpis: ServiceKpis {
            blueprint: list(vec![
                KpiRow::new("conv", "Trial onboarding", EffectKind::ConversionUplift, d(10, 0)),
                KpiRow::new("arpu", "Pricing tiers", EffectKind::AovUplift, d(5, 0)),
                KpiRow::new("churn", "Cancellation flow", EffectKind::ChurnReduction, d(5, 1)),
                KpiRow::new("impl", "Analytics", EffectKind::MonthlyImplementationCost, d(400, 0)),
            ]),
            ops_dev_lab: list(vec![
                KpiRow::new("hours", "Support macros", EffectKind::HoursSavedPerWeek, d(8, 0)),
                KpiRow::new("errors", "Billing fixes", EffectKind::ErrorReduction, d(40, 0)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(150, 0)),
            ]),
            accelerator: list(vec![
                KpiRow::new("conv", "Paid acquisition", EffectKind::ConversionUplift, d(12, 0)),
                KpiRow::new("retention", "Expansion revenue", EffectKind::RetentionUplift, d(4, 0)),
                KpiRow::new("roas", "Bid strategy", EffectKind::RoasUplift, d(20, 0)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(600, 0)),
            ]),
        },
    }
}

/// Service business selling projects from inbound leads.
pub fn services() -> Preset {
    Preset {
        name: "services".to_string(),
        description: "Service business closing projects from inbound leads".to_string(),
        baseline: Baseline {
            monthly_traffic: d(1500, 0),
            conversion_rate_pct: d(10, 0),
            average_order_value: d(2500, 0),
            gross_margin_pct: d(40, 0),
            subscribers: Decimal::ZERO,
            monthly_churn_pct: Decimal::ZERO,
            monthly_ad_spend: d(8000, 0),
            roas: d(4, 0),
            hourly_rate: d(55, 0),
            wasted_hours_per_week: d(40, 0),
            monthly_errors: d(15, 0),
            cost_per_error: d(200, 0),
        },
        fees: FeeSchedule {
            blueprint: d(7000, 0),
            ops_dev_lab: d(10000, 0),
            accelerator: d(14000, 0),
        },
        kpis: ServiceKpis {
            blueprint: list(vec![
                KpiRow::new("conv", "Proposal templates", EffectKind::ConversionUplift, d(6, 0)),
                KpiRow::new("gm", "Scope control", EffectKind::GrossMarginImprovement, d(20, 1)),
                KpiRow::new("impl", "CRM", EffectKind::MonthlyImplementationCost, d(350, 0)),
            ]),
            ops_dev_lab: list(vec![
                KpiRow::new("hours", "Scheduling", EffectKind::HoursSavedPerWeek, d(12, 0)),
                KpiRow::new("errors", "Handoff checklists", EffectKind::ErrorReduction, d(30, 0)),
                KpiRow::new("capacity", "Crew capacity", EffectKind::CapacityIncrease, d(15, 0)),
                KpiRow::new("util", "Booked capacity", EffectKind::UtilizationOfAddedCapacity, d(50, 0)),
                KpiRow::new("overtime", "Overtime", EffectKind::OvertimeHoursReduced, d(30, 0)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(300, 0)),
            ]),
            accelerator: list(vec![
                KpiRow::new("conv", "Lead scoring", EffectKind::ConversionUplift, d(8, 0)),
                KpiRow::new("retention", "Maintenance plans", EffectKind::RetentionUplift, d(2, 0)),
                KpiRow::new("custom", "Referral program", EffectKind::CustomFlatGrossProfit, d(1500, 0)),
                KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, d(450, 0)),
            ]),
        },
    }
}

/// Every built-in preset, in display order.
pub fn builtin_presets() -> Vec<Preset> {
    vec![dtc(), saas(), services()]
}

pub fn builtin_preset(name: &str) -> Option<Preset> {
    builtin_presets()
        .into_iter()
        .find(|preset| preset.name == name)
}

/// Writes each built-in preset the store does not already have.
///
/// Existing presets with the same name are left untouched so user edits
/// survive. Returns the names that were written.
pub async fn seed_builtin_presets<R: PresetRepository + ?Sized>(
    repo: &R
) -> Result<Vec<String>, StoreError> {
    let existing = repo.list_presets().await?;
    let mut seeded = Vec::new();

    for preset in builtin_presets() {
        if existing.contains(&preset.name) {
            continue;
        }
        repo.save_preset(&preset).await?;
        seeded.push(preset.name);
    }

    if !seeded.is_empty() {
        info!(presets = ?seeded, "Seeded built-in presets");
    }
    Ok(seeded)
}
