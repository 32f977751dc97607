//! Subscriber setup for the command-line front end.
//!
//! Diagnostics go to stderr so reports on stdout stay clean. A non-empty
//! `RUST_LOG` replaces the configured level; `--log-file` adds a second,
//! uncoloured copy of every event.

use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Builds the event filter. `env_directive` (the value of `RUST_LOG`) wins
/// over `level` unless it is blank.
fn make_filter(
    level: &str,
    env_directive: Option<&str>,
) -> Result<EnvFilter> {
    match env_directive.map(str::trim).filter(|directive| !directive.is_empty()) {
        Some(directive) => {
            EnvFilter::try_new(directive).with_context(|| format!("invalid RUST_LOG '{directive}'"))
        }
        None => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'")),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

/// Installs the global subscriber: stderr always, plus `file` when given.
pub fn init_logging(
    level: &str,
    file: Option<&Path>,
) -> Result<()> {
    let env_directive = std::env::var("RUST_LOG").ok();
    let filter = make_filter(level, env_directive.as_deref())?;

    let console = fmt::layer()
        .without_time()
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = file
        .map(open_log_file)
        .transpose()?
        .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("cannot install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn configured_level_is_used_without_env_directive() {
        let filter = make_filter("info", None).expect("Should accept level");

        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn env_directive_wins_over_configured_level() {
        let filter = make_filter("warn", Some("lift_core=debug")).expect("Should accept directive");

        assert!(filter.to_string().contains("lift_core=debug"), "{filter}");
    }

    #[test]
    fn blank_env_directive_is_ignored() {
        let filter = make_filter("error", Some("  ")).expect("Should accept level");

        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn invalid_level_is_an_error() {
        let err = make_filter("lift_core=loud", None).expect_err("invalid level");

        assert!(err.to_string().contains("lift_core=loud"), "{err}");
    }

    #[test]
    fn log_file_is_created_and_appended() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("lift.log");
        std::fs::write(&path, "earlier\n").expect("Should write log");

        open_log_file(&path).expect("Should open log file");

        assert_eq!(std::fs::read_to_string(&path).expect("Should read log"), "earlier\n");
    }

    #[test]
    fn log_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("Should create temp dir");

        let result = open_log_file(&dir.path().join("missing/lift.log"));

        assert!(result.is_err());
    }
}
