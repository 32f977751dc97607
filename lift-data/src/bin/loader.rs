use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lift_core::{RepositoryRegistry, StoreConfig};
use lift_data::{KpiCsvLoader, seed_builtin_presets};
use lift_store::register_builtin_backends;

/// Import KPI rows from a CSV file into a stored preset.
///
/// The CSV file should have the following columns:
/// - service: blueprint, ops or accelerator
/// - id: KPI id, unique within its service
/// - label: free text (may be empty)
/// - effect: effect code (conv_pct, aov_pct, gm_pp, roas_pct, churn_pp,
///   retention_pct, hours_per_week, error_reduction_pct, capacity_pct,
///   utilization_pct, overtime_hours, impl_cost, custom_gp)
/// - value: number in the effect's unit
/// - enabled: optional true/false (default true)
///
/// Every service that appears in the file has its KPI list replaced; the
/// other services keep their rows.
#[derive(Parser, Debug)]
#[command(name = "lift-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing KPI rows
    #[arg(short, long)]
    file: PathBuf,

    /// Preset to update
    #[arg(short, long)]
    preset: String,

    /// Store directory
    #[arg(short, long, default_value = ".lift")]
    store: String,

    /// Storage backend
    #[arg(short, long, default_value = "toml")]
    backend: String,

    /// Write the built-in presets before loading, skipping any that exist
    #[arg(long, default_value_t = false)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut registry = RepositoryRegistry::new();
    register_builtin_backends(&mut registry);

    let config = StoreConfig {
        backend: args.backend.clone(),
        location: args.store.clone(),
    };
    let repo = registry
        .create(&config)
        .await
        .with_context(|| format!("Failed to open {} store at: {}", args.backend, args.store))?;

    if args.seed {
        println!("Seeding built-in presets...");
        let seeded = seed_builtin_presets(repo.as_ref())
            .await
            .context("Failed to seed built-in presets")?;
        println!("Seeded {} preset(s).", seeded.len());
    }

    println!("Loading KPI rows from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let import = KpiCsvLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!(
        "Parsed {} rows for {} service(s)",
        import.row_count(),
        import.services().len()
    );

    let written = KpiCsvLoader::load(repo.as_ref(), &args.preset, &import)
        .await
        .with_context(|| format!("Failed to update preset: {}", args.preset))?;

    println!("Successfully loaded {} KPI rows into preset '{}'.", written, args.preset);

    Ok(())
}
