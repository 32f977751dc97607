use serde::{Deserialize, Serialize};

use crate::{Baseline, FeeSchedule, KpiList, Service};

/// KPI lists keyed by service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceKpis {
    pub blueprint: KpiList,
    pub ops_dev_lab: KpiList,
    pub accelerator: KpiList,
}

impl ServiceKpis {
    pub fn for_service(
        &self,
        service: Service,
    ) -> &KpiList {
        match service {
            Service::Blueprint => &self.blueprint,
            Service::OpsDevLab => &self.ops_dev_lab,
            Service::Accelerator => &self.accelerator,
        }
    }

    pub fn for_service_mut(
        &mut self,
        service: Service,
    ) -> &mut KpiList {
        match service {
            Service::Blueprint => &mut self.blueprint,
            Service::OpsDevLab => &mut self.ops_dev_lab,
            Service::Accelerator => &mut self.accelerator,
        }
    }
}

/// A named starting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub baseline: Baseline,
    pub fees: FeeSchedule,
    #[serde(default)]
    pub kpis: ServiceKpis,
}
