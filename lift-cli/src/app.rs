//! Command dispatch: opens the store, restores the session, runs one
//! command and writes the session back.

use std::io::Write;

use anyhow::{Context, Result, anyhow, bail};
use lift_core::{
    Baseline, EffectKind, KpiRow, Preset, PresetRepository, RepositoryRegistry, Scenario, Service,
    SessionState, StoreError,
};
use tracing::{debug, info, warn};

use crate::cli::{BaselineCommand, Cli, Command, KpiCommand, PresetCommand};
use crate::config::AppConfig;
use crate::report;
use crate::utils::{format_money, parse_decimal};

/// Registry with every backend shipped in `lift-store`.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    lift_store::register_builtin_backends(&mut registry);
    registry
}

/// Opens the configured store and seeds any missing built-in presets.
pub async fn open_store(config: &AppConfig) -> Result<Box<dyn PresetRepository>> {
    let store_config = config.store_config();
    let repo = build_registry()
        .create(&store_config)
        .await
        .with_context(|| {
            format!(
                "cannot open '{}' store at '{}'",
                store_config.backend, store_config.location
            )
        })?;

    lift_data::seed_builtin_presets(repo.as_ref())
        .await
        .context("cannot seed built-in presets")?;
    Ok(repo)
}

async fn fresh_session(
    repo: &dyn PresetRepository,
    preset: &str,
) -> Result<SessionState> {
    let preset = repo
        .get_preset(preset)
        .await
        .with_context(|| format!("cannot load preset '{preset}'"))?;
    Ok(SessionState::from_preset(&preset))
}

/// Restores the cached session, or seeds a new one from `preset`.
///
/// The cache is best effort: a read failure is logged and ignored. When
/// `explicit_preset` is set and the cached session came from a different
/// preset, the cache is bypassed.
pub async fn load_session(
    repo: &dyn PresetRepository,
    preset: &str,
    explicit_preset: bool,
    use_cache: bool,
) -> Result<SessionState> {
    if !use_cache {
        return fresh_session(repo, preset).await;
    }

    match repo.load_session().await {
        Ok(Some(session)) if explicit_preset && session.preset_name != preset => {
            info!(
                cached = %session.preset_name,
                requested = %preset,
                "Cached session belongs to another preset; starting fresh"
            );
            fresh_session(repo, preset).await
        }
        Ok(Some(session)) => {
            debug!(preset = %session.preset_name, "Restored cached session");
            Ok(session)
        }
        Ok(None) => fresh_session(repo, preset).await,
        Err(e) => {
            warn!(error = %e, "Cannot read cached session; starting from preset");
            fresh_session(repo, preset).await
        }
    }
}

/// Writes the session to the cache; failures are logged, not returned.
pub async fn save_session(
    repo: &dyn PresetRepository,
    session: &SessionState,
) {
    if let Err(e) = repo.save_session(session).await {
        warn!(error = %e, "Cannot write session cache");
    }
}

/// Runs the parsed command against `config`, writing reports to `out`.
pub async fn run(
    cli: &Cli,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<()> {
    let repo = open_store(config).await?;
    let mut session = load_session(
        repo.as_ref(),
        &config.default_preset,
        cli.preset.is_some(),
        config.cache_session,
    )
    .await?;

    let changed = execute(&cli.command, repo.as_ref(), &mut session, out).await?;

    if config.cache_session && changed {
        save_session(repo.as_ref(), &session).await;
    }
    Ok(())
}

/// Applies one command; returns whether the session was modified.
async fn execute(
    command: &Command,
    repo: &dyn PresetRepository,
    session: &mut SessionState,
    out: &mut impl Write,
) -> Result<bool> {
    let changed = match command {
        Command::Evaluate {
            service,
            scenario,
            breakdown,
        } => {
            let changed = select(session, *service, *scenario);
            let evaluation = session.evaluate();
            write!(out, "{}", report::render_evaluation(session, &evaluation))?;
            if *breakdown {
                writeln!(out)?;
                write!(out, "{}", report::render_breakdown(&evaluation))?;
            }
            changed
        }

        Command::Sweep { service } => {
            let changed = select(session, *service, None);
            write!(out, "{}", report::render_sweep(&session.sweep(), session.scenario))?;
            changed
        }

        Command::Presets { action } => preset_command(action.as_ref(), repo, session, out).await?,

        Command::Kpi { action } => kpi_command(action, session, out)?,

        Command::Baseline { action } => match action {
            BaselineCommand::Show => {
                write!(out, "{}", report::render_baseline(&session.baseline, &session.fees))?;
                false
            }
            BaselineCommand::Set { field, value } => {
                let value = parse_decimal(value)?;
                let slot = session.baseline.field_mut(field).ok_or_else(|| {
                    anyhow!(
                        "unknown baseline field '{field}'; expected one of: {}",
                        Baseline::FIELDS.join(", ")
                    )
                })?;
                *slot = value;
                writeln!(out, "{field} = {}", value.normalize())?;
                true
            }
        },

        Command::Fee { service, amount } => {
            let amount = parse_decimal(amount)?;
            session.fees.set_fee(*service, amount);
            writeln!(out, "{service} fee = {}", format_money(amount))?;
            true
        }

        Command::Select { service, scenario } => {
            select(session, *service, *scenario);
            writeln!(out, "{} | {}", session.service, session.scenario)?;
            true
        }

        Command::Reset { clear_cache: true } => {
            repo.clear_session()
                .await
                .context("cannot clear cached session")?;
            writeln!(out, "Cleared cached session")?;
            false
        }

        Command::Reset { clear_cache: false } => {
            let preset = repo
                .get_preset(&session.preset_name)
                .await
                .with_context(|| format!("cannot reload preset '{}'", session.preset_name))?;
            session.reset_to(&preset);
            writeln!(out, "Reset to preset '{}'", preset.name)?;
            true
        }
    };
    Ok(changed)
}

fn select(
    session: &mut SessionState,
    service: Option<Service>,
    scenario: Option<Scenario>,
) -> bool {
    let mut changed = false;
    if let Some(service) = service {
        changed |= session.service != service;
        session.service = service;
    }
    if let Some(scenario) = scenario {
        changed |= session.scenario != scenario;
        session.scenario = scenario;
    }
    changed
}

async fn preset_command(
    action: Option<&PresetCommand>,
    repo: &dyn PresetRepository,
    session: &mut SessionState,
    out: &mut impl Write,
) -> Result<bool> {
    match action {
        None | Some(PresetCommand::List) => {
            let names = repo.list_presets().await.context("cannot list presets")?;
            write!(out, "{}", report::render_presets(&names, &session.preset_name))?;
            Ok(false)
        }
        Some(PresetCommand::Save { name, description }) => {
            let preset = Preset {
                name: name.clone(),
                description: description.clone(),
                baseline: session.baseline.clone(),
                fees: session.fees.clone(),
                kpis: session.kpis.clone(),
            };
            repo.save_preset(&preset)
                .await
                .with_context(|| format!("cannot save preset '{name}'"))?;
            session.preset_name = name.clone();
            writeln!(out, "Saved preset '{name}'")?;
            Ok(true)
        }
        Some(PresetCommand::Delete { name }) => {
            if *name == session.preset_name {
                bail!("preset '{name}' is in use by the current session; reset to another preset first");
            }
            match repo.delete_preset(name).await {
                Ok(()) => {
                    writeln!(out, "Deleted preset '{name}'")?;
                    Ok(false)
                }
                Err(StoreError::NotFound(_)) => bail!("no preset named '{name}'"),
                Err(e) => Err(e).with_context(|| format!("cannot delete preset '{name}'")),
            }
        }
    }
}

fn kpi_command(
    action: &KpiCommand,
    session: &mut SessionState,
    out: &mut impl Write,
) -> Result<bool> {
    let current = session.service;
    let target = |service: &Option<Service>| service.unwrap_or(current);

    match action {
        KpiCommand::List { service } => {
            let service = target(service);
            write!(
                out,
                "{}",
                report::render_kpis(service, session.kpis.for_service(service))
            )?;
            Ok(false)
        }
        KpiCommand::Enable { id, service } | KpiCommand::Disable { id, service } => {
            let enabled = matches!(action, KpiCommand::Enable { .. });
            let service = target(service);
            session
                .kpis
                .for_service_mut(service)
                .set_enabled(id, enabled)
                .with_context(|| format!("cannot edit {service} KPIs"))?;
            writeln!(
                out,
                "{service}: {id} {}",
                if enabled { "enabled" } else { "disabled" }
            )?;
            Ok(true)
        }
        KpiCommand::Set { id, value, service } => {
            let service = target(service);
            let value = parse_decimal(value)?;
            session
                .kpis
                .for_service_mut(service)
                .set_value(id, value)
                .with_context(|| format!("cannot edit {service} KPIs"))?;
            writeln!(out, "{service}: {id} = {}", value.normalize())?;
            Ok(true)
        }
        KpiCommand::Add {
            id,
            effect,
            value,
            label,
            service,
        } => {
            let service = target(service);
            let effect = EffectKind::parse(effect).ok_or_else(|| {
                let codes: Vec<&str> = EffectKind::ALL.iter().map(EffectKind::as_str).collect();
                anyhow!("unknown effect '{effect}'; expected one of: {}", codes.join(", "))
            })?;
            let value = parse_decimal(value)?;
            session
                .kpis
                .for_service_mut(service)
                .push(KpiRow::new(id.as_str(), label.as_str(), effect, value))
                .with_context(|| format!("cannot edit {service} KPIs"))?;
            writeln!(out, "{service}: added {id}")?;
            Ok(true)
        }
        KpiCommand::Remove { id, service } => {
            let service = target(service);
            session
                .kpis
                .for_service_mut(service)
                .remove(id)
                .with_context(|| format!("cannot edit {service} KPIs"))?;
            writeln!(out, "{service}: removed {id}")?;
            Ok(true)
        }
    }
}
