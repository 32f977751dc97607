use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use lift_cli::cli::Cli;
use lift_cli::config::AppConfig;
use lift_cli::{app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_overrides(&cli.overrides());

    logging::init_logging(&config.log_level, config.log_file.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(&cli, &config, &mut out).await?;
    out.flush()?;
    Ok(())
}
