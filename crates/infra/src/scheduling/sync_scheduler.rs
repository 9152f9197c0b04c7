//! Sync scheduler for repeated sync cycles.
//!
//! Runs [`SyncService::run_cycle`] over the configured entries. With a zero
//! interval a single cycle runs and the task finishes; otherwise cycles repeat
//! forever with the interval slept between them. Cancelling stops the loop
//! during a cycle or during the sleep.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use reportsync_infra::scheduling::{SyncScheduler, SyncSchedulerConfig};
//!
//! # async fn example(service: Arc<reportsync_core::SyncService>, entries: Vec<reportsync_domain::Entry>) -> Result<(), reportsync_infra::scheduling::SchedulerError> {
//! let mut scheduler = SyncScheduler::new(
//!     service,
//!     entries,
//!     SyncSchedulerConfig { interval: Duration::from_secs(3600), ..Default::default() },
//! );
//!
//! scheduler.start().await?;
//! // ... until shutdown ...
//! let report = scheduler.stop().await?;
//! println!("{} cycles", report.cycles);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reportsync_core::{CycleSummary, SyncService};
use reportsync_domain::Entry;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

type TaskHandle = Arc<Mutex<Option<JoinHandle<RunReport>>>>;

/// Configuration for sync scheduler
#[derive(Debug, Clone)]
pub struct SyncSchedulerConfig {
    /// Pause between cycles; zero runs a single cycle
    pub interval: Duration,
    /// How long `stop` waits for the loop task to finish
    pub join_timeout: Duration,
}

impl Default for SyncSchedulerConfig {
    fn default() -> Self {
        Self { interval: Duration::ZERO, join_timeout: Duration::from_secs(5) }
    }
}

/// Totals across every cycle the scheduler ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Completed cycles
    pub cycles: u32,
    pub succeeded: usize,
    pub failed: usize,
    /// The loop ended because it was cancelled
    pub cancelled: bool,
}

impl RunReport {
    fn record(&mut self, summary: CycleSummary) {
        self.cycles += 1;
        self.succeeded += summary.succeeded;
        self.failed += summary.failed;
    }
}

/// Sync scheduler
pub struct SyncScheduler {
    service: Arc<SyncService>,
    entries: Arc<[Entry]>,
    config: SyncSchedulerConfig,
    cancellation_token: CancellationToken,
    finished: CancellationToken,
    task_handle: TaskHandle,
}

impl SyncScheduler {
    pub fn new(
        service: Arc<SyncService>,
        entries: impl Into<Arc<[Entry]>>,
        config: SyncSchedulerConfig,
    ) -> Self {
        Self {
            service,
            entries: entries.into(),
            config,
            cancellation_token: CancellationToken::new(),
            finished: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the scheduler
    ///
    /// Spawns a background task that runs the sync loop.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler is already running
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!(
            interval_secs = self.config.interval.as_secs(),
            entries = self.entries.len(),
            "Starting sync scheduler"
        );

        // Fresh tokens support restart after stop
        self.cancellation_token = CancellationToken::new();
        self.finished = CancellationToken::new();

        let service = Arc::clone(&self.service);
        let entries = Arc::clone(&self.entries);
        let interval = self.config.interval;
        let cancel = self.cancellation_token.clone();
        let finished = self.finished.clone();

        let handle = tokio::spawn(async move {
            // Fires on return and on unwind alike
            let _finished = finished.drop_guard();
            Self::sync_loop(&service, &entries, interval, &cancel).await
        });

        *self.task_handle.lock().await = Some(handle);
        Ok(())
    }

    /// Resolves once the loop task has ended, whether it returned, was
    /// cancelled or panicked.
    pub async fn finished(&self) {
        self.finished.cancelled().await;
    }

    /// Stop the scheduler and return the totals.
    ///
    /// Cancels the loop if it is still running and awaits completion.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler was never started, or the task does not
    /// finish within the join timeout.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<RunReport> {
        let handle = self.task_handle.lock().await.take().ok_or(SchedulerError::NotRunning)?;

        self.cancellation_token.cancel();

        let join_timeout = self.config.join_timeout;
        let report = tokio::time::timeout(join_timeout, handle)
            .await
            .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;

        info!(
            cycles = report.cycles,
            succeeded = report.succeeded,
            failed = report.failed,
            cancelled = report.cancelled,
            "Sync scheduler stopped"
        );
        Ok(report)
    }

    /// Check if scheduler is running
    ///
    /// A scheduler is considered running if it has an active task handle that
    /// hasn't finished.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    async fn sync_loop(
        service: &SyncService,
        entries: &[Entry],
        interval: Duration,
        cancel: &CancellationToken,
    ) -> RunReport {
        let mut report = RunReport::default();

        loop {
            let summary = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Sync loop cancelled during a cycle");
                    report.cancelled = true;
                    break;
                }
                summary = service.run_cycle(entries) => summary,
            };
            report.record(summary);

            if interval.is_zero() {
                info!("Completed pushing all entries");
                break;
            }

            info!(sleep_secs = interval.as_secs(), cycle = report.cycles, "Waiting for next cycle");
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Sync loop cancelled while waiting");
                    report.cancelled = true;
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        report
    }
}

/// Ensure scheduler is stopped when dropped
impl Drop for SyncScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("SyncScheduler dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
