use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsticker::app::AppContext;
use newsticker::cli::{commands, Cli, Commands};
use newsticker::config::{Config, ConfigError};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = load_config(&cli)?;
    cli.apply_overrides(&mut config);
    for (binding, error) in config.keybindings.invalid_bindings() {
        tracing::warn!("Ignoring key binding {:?}: {}", binding, error);
    }

    let ctx = AppContext::new(config).context("Failed to set up HTTP client")?;

    let code = match cli.command.clone().unwrap_or(Commands::Show) {
        Commands::Show => commands::show(Arc::new(ctx)).await?,
        Commands::List => commands::list(Arc::new(ctx)).await?,
        Commands::ResetPosition => commands::reset_position(&ctx)?,
    };

    Ok(code)
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    match &cli.log {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .init();
        }
        None => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match loaded {
        Ok(config) => Ok(config),
        Err(ConfigError::NoConfigDir) => {
            tracing::warn!("No config directory found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load configuration"),
    }
}
