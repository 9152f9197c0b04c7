//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "reportsync",
    version,
    about = "Push your reporting API reports to dashboard datasets",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path; standard locations are probed when omitted
    #[arg(long, short = 'c', global = true, env = "REPORTSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch report data and push it to the configured datasets
    Push,

    /// List reports and print the parameters a report needs
    Reports {
        #[command(subcommand)]
        action: ReportsCommand,
    },

    /// Generate and validate a config
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Print the version info
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// List reports across all categories
    List {
        /// Only show reports whose name contains this phrase
        #[arg(long)]
        filter: Option<String>,
    },

    /// Print the fields and parameters of a report
    Parameters {
        /// Report id, as printed by `reports list`
        #[arg(long)]
        report: String,

        /// Category id, as printed by `reports list`
        #[arg(long)]
        category: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Load the config and run every validation rule
    Validate,
    /// Write a template config (refuses to overwrite)
    Generate,
}
