//! Plain-text rendering of results, sweeps and KPI tables.

use std::fmt::Write;

use lift_core::calculations::{Evaluation, ScenarioSeries};
use lift_core::{Baseline, FeeSchedule, KpiList, Scenario, Service, SessionState};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::utils::{format_money, format_payback, format_roi};

/// Width of the longest bar in the scenario chart.
pub const BAR_WIDTH: usize = 40;

// ============================================================================
// Evaluation
// ============================================================================

pub fn render_evaluation(
    session: &SessionState,
    evaluation: &Evaluation,
) -> String {
    let outcome = &evaluation.outcome;
    let mut out = String::new();

    let _ = writeln!(out, "{} | {} | preset {}", session.service, session.scenario, session.preset_name);
    let _ = writeln!(out, "{:<24}{:>16}", "Fee", format_money(session.active_fee()));
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<24}{:>16}", "Monthly GP lift", format_money(outcome.monthly_gross_profit_lift));
    let _ = writeln!(out, "{:<24}{:>16}", "Annual GP lift", format_money(outcome.annual_gross_profit_lift));
    let _ = writeln!(out, "{:<24}{:>16}", "Payback", format_payback(outcome.payback_months));
    let _ = writeln!(out, "{:<24}{:>16}", "ROI", format_roi(outcome.roi_percent()));
    out
}

/// The gross-profit components that sum to the monthly lift.
pub fn render_breakdown(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    for (label, amount) in evaluation.breakdown.components() {
        let _ = writeln!(out, "  {label:<22}{:>16}", format_money(amount));
    }
    let _ = writeln!(
        out,
        "  {:<22}{:>16}",
        "Total",
        format_money(evaluation.breakdown.monthly_gross_profit())
    );
    out
}

// ============================================================================
// Sweep
// ============================================================================

/// Bar length for `value` relative to the largest magnitude in the chart.
fn bar_len(
    value: Decimal,
    max_abs: Decimal,
) -> usize {
    if max_abs.is_zero() {
        return 0;
    }
    (value.abs() / max_abs * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}

/// Table of the three scenarios followed by a bar chart of monthly lift.
/// Negative lifts are drawn with `-`, positive with `#`; `>` marks the
/// selected scenario.
pub fn render_sweep(
    series: &ScenarioSeries,
    selected: Scenario,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", series.service);
    let _ = writeln!(
        out,
        "  {:<14}{:>16}{:>18}{:>16}{:>12}",
        "Scenario", "Monthly GP", "Annual GP", "Payback", "ROI"
    );
    for point in series.iter() {
        let marker = if point.scenario == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<14}{:>16}{:>18}{:>16}{:>12}",
            point.scenario.to_string(),
            format_money(point.outcome.monthly_gross_profit_lift),
            format_money(point.outcome.annual_gross_profit_lift),
            format_payback(point.outcome.payback_months),
            format_roi(point.outcome.roi_percent()),
        );
    }

    let max_abs = series
        .iter()
        .map(|point| point.outcome.monthly_gross_profit_lift.abs())
        .max()
        .unwrap_or(Decimal::ZERO);

    let _ = writeln!(out);
    for point in series.iter() {
        let value = point.outcome.monthly_gross_profit_lift;
        let fill = if value.is_sign_negative() { '-' } else { '#' };
        let bar: String = std::iter::repeat_n(fill, bar_len(value, max_abs)).collect();
        let _ = writeln!(
            out,
            "  {:<5}|{:<width$}| {}",
            point.scenario.label(),
            bar,
            format_money(value),
            width = BAR_WIDTH
        );
    }
    out
}

// ============================================================================
// Inputs
// ============================================================================

pub fn render_kpis(
    service: Service,
    kpis: &KpiList,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{service} KPIs");
    if kpis.is_empty() {
        let _ = writeln!(out, "  (none)");
        return out;
    }
    let _ = writeln!(
        out,
        "  {:<3} {:<12} {:<28} {:<20} {:>12}",
        "on", "id", "label", "effect", "value"
    );
    for row in kpis {
        let value = format!("{} {}", row.value.normalize(), row.effect.unit().suffix());
        let _ = writeln!(
            out,
            "  [{}] {:<12} {:<28} {:<20} {:>12}",
            if row.enabled { 'x' } else { ' ' },
            row.id,
            row.label,
            row.effect.as_str(),
            value
        );
    }
    out
}

pub fn render_baseline(
    baseline: &Baseline,
    fees: &FeeSchedule,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Baseline");
    for (name, value) in baseline.fields() {
        let _ = writeln!(out, "  {name:<24}{:>16}", value.normalize());
    }
    let _ = writeln!(out, "Fees");
    for service in Service::ALL {
        let _ = writeln!(
            out,
            "  {:<24}{:>16}",
            service.as_str(),
            format_money(fees.fee_for(service))
        );
    }
    out
}

pub fn render_presets(
    names: &[String],
    active: &str,
) -> String {
    let mut out = String::new();
    for name in names {
        let marker = if name == active { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use lift_core::calculations::sweep;
    use lift_core::{EffectKind, KpiRow, Preset, ServiceKpis};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn session() -> SessionState {
        SessionState::from_preset(&Preset {
            name: "dtc".to_string(),
            description: String::new(),
            baseline: Baseline {
                monthly_traffic: dec!(20000),
                conversion_rate_pct: dec!(2.5),
                average_order_value: dec!(80),
                gross_margin_pct: dec!(55),
                monthly_ad_spend: dec!(10000),
                roas: dec!(3.0),
                ..Baseline::default()
            },
            fees: FeeSchedule {
                blueprint: dec!(6000),
                ops_dev_lab: dec!(8000),
                accelerator: dec!(0),
            },
            kpis: ServiceKpis {
                blueprint: KpiList::try_from(vec![
                    KpiRow::new("conv", "Checkout", EffectKind::ConversionUplift, dec!(5)),
                    KpiRow::new("aov", "Bundles", EffectKind::AovUplift, dec!(7.5)),
                    KpiRow::new("gm", "Margin", EffectKind::GrossMarginImprovement, dec!(1.0)),
                    KpiRow::new("roas", "Ads", EffectKind::RoasUplift, dec!(10)),
                    KpiRow::new("impl", "Tooling", EffectKind::MonthlyImplementationCost, dec!(300)),
                ])
                .expect("unique ids"),
                ..ServiceKpis::default()
            },
        })
    }

    #[test]
    fn bar_len_scales_to_largest_magnitude() {
        assert_eq!(bar_len(dec!(100), dec!(100)), BAR_WIDTH);
        assert_eq!(bar_len(dec!(50), dec!(100)), BAR_WIDTH / 2);
        assert_eq!(bar_len(dec!(-25), dec!(100)), BAR_WIDTH / 4);
        assert_eq!(bar_len(dec!(0), dec!(0)), 0);
    }

    #[test]
    fn evaluation_shows_outcome_figures() {
        let session = session();
        let text = render_evaluation(&session, &session.evaluate());

        assert!(text.contains("$4,264.00"), "{text}");
        assert!(text.contains("$51,168.00"), "{text}");
        assert!(text.contains("1.41 months"), "{text}");
        assert!(text.contains("752.8%"), "{text}");
    }

    #[test]
    fn undefined_roi_renders_placeholder() {
        let mut session = session();
        session.service = Service::Accelerator;

        let text = render_evaluation(&session, &session.evaluate());

        let roi_line = text.lines().find(|line| line.starts_with("ROI")).expect("ROI line");
        assert!(roi_line.ends_with('—'), "{roi_line}");
        assert!(!roi_line.contains("0.0%"));
    }

    #[test]
    fn breakdown_lists_components_and_total() {
        let session = session();
        let text = render_breakdown(&session.evaluate());

        assert!(text.contains("Revenue growth"));
        assert!(text.contains("$2,884.00"));
        assert!(text.contains("-$300.00"));
        assert!(text.lines().last().expect("total line").contains("$4,264.00"));
    }

    #[test]
    fn sweep_marks_selection_and_draws_full_bar_for_high() {
        let session = session();
        let series = sweep(
            session.service,
            &session.baseline,
            &session.fees,
            &session.kpis,
        );

        let text = render_sweep(&series, Scenario::Base);

        let marked: Vec<_> = text.lines().filter(|line| line.starts_with('>')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Base"));
        let full_bar = "#".repeat(BAR_WIDTH);
        let high_bar = text
            .lines()
            .find(|line| line.trim_start().starts_with("High") && line.contains('|'))
            .expect("high bar");
        assert!(high_bar.contains(&full_bar), "{high_bar}");
    }

    #[test]
    fn kpi_table_shows_units_and_flags() {
        let mut kpis = session().kpis.blueprint;
        kpis.set_enabled("impl", false).expect("row exists");

        let text = render_kpis(Service::Blueprint, &kpis);

        let impl_line = text.lines().find(|line| line.contains("impl")).expect("impl row");
        assert!(impl_line.starts_with("  [ ]"));
        assert!(impl_line.contains("300 $/mo"));
        let aov_line = text.lines().find(|line| line.contains("aov_pct")).expect("aov row");
        assert!(aov_line.starts_with("  [x]"));
        assert!(aov_line.contains("7.5 %"));
    }

    #[test]
    fn empty_kpi_list_says_none() {
        let text = render_kpis(Service::OpsDevLab, &KpiList::new());
        assert!(text.contains("(none)"));
    }

    #[test]
    fn presets_mark_active() {
        let names = vec!["dtc".to_string(), "saas".to_string()];

        assert_eq!(render_presets(&names, "saas"), "  dtc\n* saas\n");
    }
}
