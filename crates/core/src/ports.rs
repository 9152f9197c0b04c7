//! Port interfaces for the sync pipeline
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reportsync_domain::{
    Category, DatasetRow, DatasetSchema, Page, PageRequest, Report, ReportData, ReportDataRequest,
    Result,
};

/// Typed access to the reporting API.
#[async_trait]
pub trait ReportingClient: Send + Sync {
    /// List one page of report categories
    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>>;

    /// List one page of the reports in a category
    async fn list_reports(&self, category_id: &str, page: PageRequest) -> Result<Page<Report>>;

    /// Fetch a report definition (fields and parameters)
    async fn get_report(&self, category_id: &str, report_id: &str) -> Result<Report>;

    /// Run a report and fetch one page of its rows
    async fn get_report_data(
        &self,
        request: &ReportDataRequest,
        page: PageRequest,
    ) -> Result<ReportData>;
}

/// Writes schemas and rows to the dataset API.
#[async_trait]
pub trait DatasetPublisher: Send + Sync {
    /// Create the dataset, or confirm an existing one matches the schema
    async fn find_or_create(&self, schema: &DatasetSchema) -> Result<()>;

    /// Replace every row in the dataset
    async fn replace_rows(&self, schema: &DatasetSchema, rows: &[DatasetRow]) -> Result<()>;

    /// Append rows, deduplicated by the dataset's `unique_by` keys
    async fn append_rows(&self, schema: &DatasetSchema, rows: &[DatasetRow]) -> Result<()>;
}

/// Wall clock abstraction so date keywords can be tested on a frozen instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
