//! reportsync - push reporting API reports into dashboard datasets
//!
//! Usage:
//! ```bash
//! # Write a template config, then check it
//! reportsync config generate
//! reportsync config validate
//!
//! # Find report and category ids
//! reportsync reports list --filter Jobs
//! reportsync reports parameters --report 2222 --category operations
//!
//! # Run the sync (once, or forever when refresh_time > 0)
//! reportsync --config config.yml push
//! ```

mod cli;
mod commands;
mod context;

use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command, ConfigCommand, ReportsCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so listings on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(err) => debug!(error = %err, "No .env file loaded"),
    }

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Command::Push => commands::push::run(config_path).await,
        Command::Reports { action } => match action {
            ReportsCommand::List { filter } => {
                commands::reports::list(config_path, filter.as_deref()).await
            }
            ReportsCommand::Parameters { report, category } => {
                commands::reports::parameters(config_path, &category, &report).await
            }
        },
        Command::Config { action } => match action {
            ConfigCommand::Validate => commands::config::validate(config_path),
            ConfigCommand::Generate => commands::config::generate(config_path),
        },
        Command::Version => {
            commands::version::print();
            Ok(())
        }
    }
}
