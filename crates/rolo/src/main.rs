//! rolo command-line entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use rolo_settings::{RoloSettings, load_settings, load_settings_from_path};
use rolo_sync::SyncScheduler;

/// Keep a CardDAV address book and a folder of Markdown contact notes in sync.
#[derive(Parser)]
#[command(name = "rolo", version, about)]
struct Cli {
    /// Settings file (defaults to ~/.rolo/settings.json).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one reconciliation cycle and exit.
    Sync,
    /// Run cycles on the configured interval until interrupted.
    Watch,
    /// Verify the CardDAV server is reachable.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => load_settings().context("loading settings")?,
    };
    init_tracing(&settings);

    match cli.command {
        Command::Sync => {
            let engine = rolo::build_engine(&settings)?;
            let report = engine.run().await?;
            if report.has_failures() {
                bail!("{} record(s) failed to apply", report.failed);
            }
        }
        Command::Watch => {
            let interval = rolo::sync_interval(&settings);
            if interval.is_zero() {
                bail!("periodic sync is disabled (sync.intervalMinutes is 0)");
            }
            let engine = Arc::new(rolo::build_engine(&settings)?);
            let scheduler = SyncScheduler::start(engine, interval);

            tokio::signal::ctrl_c()
                .await
                .context("listening for ctrl+c")?;
            tracing::info!("shutting down");
            scheduler.shutdown().await;
        }
        Command::Check => {
            let engine = rolo::build_engine(&settings)?;
            engine.check_connection().await?;
            tracing::info!(url = %settings.remote.server_url, "connection test successful");
        }
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` wins over the settings filter.
fn init_tracing(settings: &RoloSettings) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.filter)),
        )
        .init();
}
