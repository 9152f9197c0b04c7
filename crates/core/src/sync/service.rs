//! Entry sync service - one pass over the configured entries

use std::sync::Arc;
use std::time::Duration;

use reportsync_domain::constants::RATE_LIMIT_DELAY;
use reportsync_domain::{Entry, PageRequest, ReportDataRequest, Result, WriteMode};
use tracing::{error, info};

use crate::dataset::DatasetBuilder;
use crate::parameters::ParameterResolver;
use crate::ports::{DatasetPublisher, ReportingClient};

/// Tunables for a sync pass
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Pause after every entry whose report data was requested.
    pub rate_limit_delay: Duration,
    /// Page of report data fetched per entry.
    pub page: PageRequest,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { rate_limit_delay: RATE_LIMIT_DELAY, page: PageRequest::report_data() }
    }
}

/// Outcome counts for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Sync service
pub struct SyncService {
    reporting: Arc<dyn ReportingClient>,
    publisher: Arc<dyn DatasetPublisher>,
    resolver: ParameterResolver,
    config: SyncConfig,
}

impl SyncService {
    pub fn new(
        reporting: Arc<dyn ReportingClient>,
        publisher: Arc<dyn DatasetPublisher>,
        resolver: ParameterResolver,
    ) -> Self {
        Self { reporting, publisher, resolver, config: SyncConfig::default() }
    }

    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Run every entry once, in order.
    ///
    /// A failing entry is logged and counted; it never stops the entries
    /// after it.
    pub async fn run_cycle(&self, entries: &[Entry]) -> CycleSummary {
        let mut summary = CycleSummary::default();

        for (idx, entry) in entries.iter().enumerate() {
            let position = idx + 1;
            info!(
                entry = position,
                report_id = %entry.report.id,
                category_id = %entry.report.category_id,
                "Processing entry"
            );

            let mut data_requested = false;
            match self.sync_entry(entry, &mut data_requested).await {
                Ok(rows) => {
                    summary.succeeded += 1;
                    info!(entry = position, rows, "Entry pushed");
                }
                Err(err) => {
                    summary.failed += 1;
                    error!(entry = position, kind = err.kind(), error = %err, "Entry failed");
                }
            }

            if data_requested && !self.config.rate_limit_delay.is_zero() {
                info!(
                    delay_secs = self.config.rate_limit_delay.as_secs(),
                    "Waiting for reporting API rate limit"
                );
                tokio::time::sleep(self.config.rate_limit_delay).await;
            }
        }

        info!(succeeded = summary.succeeded, failed = summary.failed, "Sync cycle finished");
        summary
    }

    /// Sync a single entry without rate-limit pacing. Returns the row count.
    pub async fn process_entry(&self, entry: &Entry) -> Result<usize> {
        let mut data_requested = false;
        self.sync_entry(entry, &mut data_requested).await
    }

    async fn sync_entry(&self, entry: &Entry, data_requested: &mut bool) -> Result<usize> {
        let selector = &entry.report;
        let report = self.reporting.get_report(&selector.category_id, &selector.id).await?;
        let parameters = self.resolver.resolve(&report, &selector.parameters)?;

        let request = ReportDataRequest {
            category_id: selector.category_id.clone(),
            report_id: selector.id.clone(),
            parameters,
        };
        *data_requested = true;
        let data = self.reporting.get_report_data(&request, self.config.page).await?;

        let builder = DatasetBuilder::new(&report, &entry.dataset);
        let schema = builder.build_schema();
        let rows = builder.build_rows(&schema, &data)?;

        self.publisher.find_or_create(&schema).await?;
        match entry.dataset.mode() {
            WriteMode::Replace => self.publisher.replace_rows(&schema, &rows).await?,
            WriteMode::Append => self.publisher.append_rows(&schema, &rows).await?,
        }

        Ok(rows.len())
    }
}
