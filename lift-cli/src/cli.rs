use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lift_core::{Scenario, Service};

use crate::config::ConfigOverrides;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gross-profit lift, payback and ROI estimates for service engagements.
///
/// State is kept between runs: the first run seeds the built-in presets
/// and starts from the default preset; later runs continue the cached
/// session until `reset` or `--no-cache`.
#[derive(Debug, Parser)]
#[command(name = "lift-estimator", version, about)]
pub struct Cli {
    /// Config file (default: lift.toml in the working directory, if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (`toml` or `memory`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Store location; for `toml` this is a directory.
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Preset to start from. Replaces a cached session seeded from another preset.
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Log filter, e.g. `info` or `lift_core=debug`. RUST_LOG takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Neither read nor write the cached session.
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            backend: self.backend.clone(),
            store: self.store.clone(),
            preset: self.preset.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            no_cache: self.no_cache,
        }
    }
}

fn parse_service(s: &str) -> Result<Service, String> {
    Service::parse(s).ok_or_else(|| format!("unknown service '{s}' (blueprint, ops, accelerator)"))
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    Scenario::parse(s).ok_or_else(|| format!("unknown scenario '{s}' (low, base, high)"))
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the result for the selected service and scenario.
    Evaluate {
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
        #[arg(long, value_parser = parse_scenario)]
        scenario: Option<Scenario>,
        /// Also list the gross-profit components.
        #[arg(long)]
        breakdown: bool,
    },

    /// Compare Low, Base and High for one service.
    Sweep {
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },

    /// List, save or delete presets.
    Presets {
        #[command(subcommand)]
        action: Option<PresetCommand>,
    },

    /// Inspect or edit the KPI rows of a service.
    Kpi {
        #[command(subcommand)]
        action: KpiCommand,
    },

    /// Inspect or edit baseline metrics.
    Baseline {
        #[command(subcommand)]
        action: BaselineCommand,
    },

    /// Set the fee for a service.
    Fee {
        #[arg(value_parser = parse_service)]
        service: Service,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Change the selected service and/or scenario.
    Select {
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
        #[arg(long, value_parser = parse_scenario)]
        scenario: Option<Scenario>,
    },

    /// Discard edits and reload the session's preset.
    Reset {
        /// Delete the cached session instead; the next run starts from the
        /// configured preset.
        #[arg(long)]
        clear_cache: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    List,
    /// Save the current session as a preset.
    Save {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum KpiCommand {
    List {
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },
    Enable {
        id: String,
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },
    Disable {
        id: String,
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },
    /// Change a row's value; accepts `7.5%` or `$300`.
    Set {
        id: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },
    Add {
        id: String,
        /// Effect code, e.g. conv_pct, hours_per_week, impl_cost.
        effect: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },
    Remove {
        id: String,
        #[arg(long, value_parser = parse_service)]
        service: Option<Service>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BaselineCommand {
    Show,
    Set {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}
