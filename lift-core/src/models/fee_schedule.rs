use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Service;

/// One-time fee per service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub blueprint: Decimal,
    pub ops_dev_lab: Decimal,
    pub accelerator: Decimal,
}

impl FeeSchedule {
    /// The fee charged for `service`.
    pub fn fee_for(
        &self,
        service: Service,
    ) -> Decimal {
        match service {
            Service::Blueprint => self.blueprint,
            Service::OpsDevLab => self.ops_dev_lab,
            Service::Accelerator => self.accelerator,
        }
    }

    pub fn set_fee(
        &mut self,
        service: Service,
        fee: Decimal,
    ) {
        match service {
            Service::Blueprint => self.blueprint = fee,
            Service::OpsDevLab => self.ops_dev_lab = fee,
            Service::Accelerator => self.accelerator = fee,
        }
    }
}
