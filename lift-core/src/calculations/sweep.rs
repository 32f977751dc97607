//! Low/Base/High comparison series for charts.

use serde::{Deserialize, Serialize};

use crate::calculations::formulas::evaluate;
use crate::{Baseline, FeeSchedule, FinancialOutcome, Scenario, Service, ServiceKpis};

/// Outcome of one scenario in a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub outcome: FinancialOutcome,
}

/// One outcome per scenario, in Low, Base, High order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSeries {
    pub service: Service,
    pub points: [ScenarioOutcome; 3],
}

impl ScenarioSeries {
    pub fn get(
        &self,
        scenario: Scenario,
    ) -> &FinancialOutcome {
        let index = Scenario::ALL
            .iter()
            .position(|candidate| *candidate == scenario)
            .unwrap_or_default();
        &self.points[index].outcome
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioOutcome> {
        self.points.iter()
    }
}

/// Evaluates `service` once per scenario with its fee and KPI list.
///
/// Each point is an independent evaluation; order does not matter.
pub fn sweep(
    service: Service,
    baseline: &Baseline,
    fees: &FeeSchedule,
    kpis: &ServiceKpis,
) -> ScenarioSeries {
    let fee = fees.fee_for(service);
    let rows = kpis.for_service(service).rows();

    let points = Scenario::ALL.map(|scenario| ScenarioOutcome {
        scenario,
        outcome: evaluate(service, scenario.multiplier(), baseline, fee, rows),
    });

    ScenarioSeries { service, points }
}
