//! Palate command-line entry point

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use palate_core::{ConfigManager, FeedbackEngine, JsonFileFeedbackRepository};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();
    load_dotenv();

    let workspace = std::env::current_dir().context("cannot determine current dir")?;

    if let Commands::Init { force } = &args.command {
        return cli::handle_init_command(&workspace, *force);
    }

    let manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load_from_workspace(&workspace)?,
    };
    let config = manager.config();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.telemetry.log_level.clone());
    init_tracing(&level);

    if let Some(path) = manager.config_path() {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }

    let repository = Arc::new(JsonFileFeedbackRepository::new(&args.feedback));
    let engine = FeedbackEngine::from_config(config, repository)?;

    match &args.command {
        Commands::Analyze { customer } => cli::handle_analyze_command(&engine, customer).await,
        Commands::Assess { customer, items } => {
            cli::handle_assess_command(&engine, customer, items).await
        }
        Commands::Item { text, context } => cli::handle_item_command(&engine, text, context).await,
        Commands::Stats { customer } => cli::handle_stats_command(&engine, customer).await,
        Commands::Init { .. } => Ok(()),
    }
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => eprintln!("Warning: Failed to load .env file: {e}"),
    }
}
