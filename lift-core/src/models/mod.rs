mod baseline;
mod effect_kind;
mod fee_schedule;
mod financial_outcome;
mod kpi;
mod preset;
mod scenario;
mod service;

pub use baseline::Baseline;
pub use effect_kind::{EffectKind, EffectUnit};
pub use fee_schedule::FeeSchedule;
pub use financial_outcome::FinancialOutcome;
pub use kpi::{KpiList, KpiListError, KpiRow};
pub use preset::{Preset, ServiceKpis};
pub use scenario::Scenario;
pub use service::Service;
