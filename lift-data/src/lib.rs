mod kpi_loader;
pub mod presets;

pub use kpi_loader::{KpiCsvLoader, KpiImport, KpiLoaderError, KpiRecord};
pub use presets::{DEFAULT_PRESET, builtin_preset, builtin_presets, seed_builtin_presets};
