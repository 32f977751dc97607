//! Explicit input record for the calculation engine.
//!
//! The front end edits a [`SessionState`] and asks it for results; nothing
//! computed is stored here, so every read reflects the latest edits.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{Evaluation, ScenarioSeries, evaluate_detailed, sweep};
use crate::{Baseline, FeeSchedule, FinancialOutcome, KpiList, Preset, Scenario, Service, ServiceKpis};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Preset the session was seeded from.
    pub preset_name: String,
    pub baseline: Baseline,
    pub fees: FeeSchedule,
    pub kpis: ServiceKpis,
    #[serde(default)]
    pub service: Service,
    #[serde(default)]
    pub scenario: Scenario,
    /// When the session was last written to the cache, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Seeds a session from `preset` with Blueprint and Base selected.
    pub fn from_preset(preset: &Preset) -> Self {
        Self {
            preset_name: preset.name.clone(),
            baseline: preset.baseline.clone(),
            fees: preset.fees.clone(),
            kpis: preset.kpis.clone(),
            service: Service::default(),
            scenario: Scenario::default(),
            saved_at: None,
        }
    }

    /// Discards edits and reseeds from `preset`, keeping the selections.
    pub fn reset_to(
        &mut self,
        preset: &Preset,
    ) {
        let (service, scenario) = (self.service, self.scenario);
        *self = Self {
            service,
            scenario,
            ..Self::from_preset(preset)
        };
    }

    pub fn active_kpis(&self) -> &KpiList {
        self.kpis.for_service(self.service)
    }

    pub fn active_kpis_mut(&mut self) -> &mut KpiList {
        self.kpis.for_service_mut(self.service)
    }

    pub fn active_fee(&self) -> Decimal {
        self.fees.fee_for(self.service)
    }

    /// Result for the selected service and scenario.
    pub fn evaluate(&self) -> Evaluation {
        evaluate_detailed(
            self.service,
            self.scenario.multiplier(),
            &self.baseline,
            self.active_fee(),
            self.active_kpis().rows(),
        )
    }

    pub fn outcome(&self) -> FinancialOutcome {
        self.evaluate().outcome
    }

    /// Low/Base/High series for the selected service.
    pub fn sweep(&self) -> ScenarioSeries {
        sweep(self.service, &self.baseline, &self.fees, &self.kpis)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{EffectKind, KpiRow};

    fn preset() -> Preset {
        Preset {
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
                accelerator: dec!(12000),
            },
            kpis: ServiceKpis {
                blueprint: KpiList::try_from(vec![
                    KpiRow::new("conv", "", EffectKind::ConversionUplift, dec!(5)),
                    KpiRow::new("aov", "", EffectKind::AovUplift, dec!(7.5)),
                    KpiRow::new("gm", "", EffectKind::GrossMarginImprovement, dec!(1.0)),
                    KpiRow::new("roas", "", EffectKind::RoasUplift, dec!(10)),
                    KpiRow::new("impl", "", EffectKind::MonthlyImplementationCost, dec!(300)),
                ])
                .expect("unique ids"),
                ..ServiceKpis::default()
            },
        }
    }

    #[test]
    fn from_preset_selects_blueprint_base() {
        let session = SessionState::from_preset(&preset());

        assert_eq!(session.service, Service::Blueprint);
        assert_eq!(session.scenario, Scenario::Base);
        assert_eq!(session.active_fee(), dec!(6000));
        assert_eq!(session.outcome().monthly_gross_profit_lift, dec!(4264));
    }

    #[test]
    fn edits_are_reflected_on_next_read() {
        let mut session = SessionState::from_preset(&preset());

        session
            .active_kpis_mut()
            .set_enabled("impl", false)
            .expect("impl exists");

        assert_eq!(session.outcome().monthly_gross_profit_lift, dec!(4564));
    }

    #[test]
    fn switching_service_switches_fee_and_kpis() {
        let mut session = SessionState::from_preset(&preset());

        session.service = Service::Accelerator;

        assert_eq!(session.active_fee(), dec!(12000));
        assert!(session.active_kpis().is_empty());
        assert_eq!(session.outcome().monthly_gross_profit_lift, dec!(0));
    }

    #[test]
    fn sweep_base_point_matches_current_outcome() {
        let session = SessionState::from_preset(&preset());

        let series = session.sweep();

        assert_eq!(series.get(Scenario::Base), &session.outcome());
    }

    #[test]
    fn reset_to_keeps_selections_and_drops_edits() {
        let mut session = SessionState::from_preset(&preset());
        session.scenario = Scenario::High;
        session.baseline.monthly_traffic = dec!(1);

        session.reset_to(&preset());

        assert_eq!(session.scenario, Scenario::High);
        assert_eq!(session.baseline.monthly_traffic, dec!(20000));
    }
}
