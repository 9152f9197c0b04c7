//! `config validate` and `config generate`

use std::path::PathBuf;

use reportsync_infra::config;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config.yml";

pub fn validate(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = config::load_and_validate(config_path)?;
    info!(entries = config.entries.len(), "Config all valid");
    Ok(())
}

pub fn generate(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    config::write_template(&path)?;
    println!("Template config written to {}", path.display());
    Ok(())
}
