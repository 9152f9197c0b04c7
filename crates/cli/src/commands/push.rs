//! `push`: run sync cycles until done or interrupted

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use reportsync_infra::config;
use reportsync_infra::{SyncScheduler, SyncSchedulerConfig};
use tracing::{info, warn};

use crate::context;

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = config::load_and_validate(config_path)?;
    let service = context::sync_service(&config).context("failed to set up API clients")?;

    let mut scheduler = SyncScheduler::new(
        Arc::new(service),
        config.entries.clone(),
        SyncSchedulerConfig { interval: config.refresh_interval(), ..Default::default() },
    );
    scheduler.start().await?;

    tokio::select! {
        () = shutdown_signal() => info!("Shutdown requested, stopping after the current request"),
        () = scheduler.finished() => {}
    }

    let report = scheduler.stop().await?;
    info!(
        cycles = report.cycles,
        succeeded = report.succeeded,
        failed = report.failed,
        "Push finished"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Unable to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
