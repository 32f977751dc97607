//! Gross-profit lift calculations.
//!
//! Pipeline: KPI rows → [`aggregate`] (with [`scaler`]) → service formula →
//! [`derive_outcome`]. [`sweep`] repeats the pipeline for every scenario.
//! Everything in this module is pure and total.

pub mod aggregator;
pub mod common;
pub mod formulas;
pub mod outcome;
pub mod scaler;
pub mod sweep;

pub use aggregator::{AggregateEffects, DEFAULT_UTILIZATION, aggregate};
pub use formulas::{
    AcceleratorBreakdown, BlueprintBreakdown, Evaluation, OpsDevLabBreakdown, ServiceBreakdown,
    calculate_breakdown, evaluate, evaluate_detailed,
};
pub use outcome::derive_outcome;
pub use scaler::{is_scenario_scalable, scaled_value};
pub use sweep::{ScenarioOutcome, ScenarioSeries, sweep};
