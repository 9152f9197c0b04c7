//! Mock port implementations for testing

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reportsync_core::ports::{DatasetPublisher, ReportingClient};
use reportsync_domain::{
    ApiFailure, Category, DatasetRow, DatasetSchema, Page, PageRequest, Report, ReportData,
    ReportDataRequest, Result as DomainResult, SyncError,
};

fn not_found(path: String) -> SyncError {
    SyncError::Api(ApiFailure {
        provider: "ServiceTitan".into(),
        status_code: 404,
        request_path: path,
        body: "Not found".into(),
    })
}

/// In-memory reporting API.
///
/// Reports and data are keyed by report id. Listings are served from
/// pre-built pages indexed by page number.
#[derive(Default)]
pub struct MockReportingClient {
    reports: HashMap<String, Report>,
    data: HashMap<String, ReportData>,
    category_pages: Vec<Page<Category>>,
    report_pages: Vec<Page<Report>>,
    data_requests: Mutex<Vec<(ReportDataRequest, PageRequest)>>,
    listing_requests: Mutex<Vec<PageRequest>>,
}

impl MockReportingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, report: Report, data: ReportData) -> Self {
        let id = report.id.to_string();
        self.data.insert(id.clone(), data);
        self.reports.insert(id, report);
        self
    }

    /// Register a report whose data endpoint fails.
    pub fn with_report_without_data(mut self, report: Report) -> Self {
        self.reports.insert(report.id.to_string(), report);
        self
    }

    pub fn with_category_pages(mut self, pages: Vec<Page<Category>>) -> Self {
        self.category_pages = pages;
        self
    }

    pub fn with_report_pages(mut self, pages: Vec<Page<Report>>) -> Self {
        self.report_pages = pages;
        self
    }

    pub fn data_requests(&self) -> Vec<(ReportDataRequest, PageRequest)> {
        self.data_requests.lock().unwrap().clone()
    }

    pub fn listing_requests(&self) -> Vec<PageRequest> {
        self.listing_requests.lock().unwrap().clone()
    }

    fn page_of<T: Clone>(&self, pages: &[Page<T>], page: PageRequest) -> DomainResult<Page<T>> {
        self.listing_requests.lock().unwrap().push(page);
        pages
            .get(page.page as usize - 1)
            .cloned()
            .ok_or_else(|| not_found(format!("page {}", page.page)))
    }
}

#[async_trait]
impl ReportingClient for MockReportingClient {
    async fn list_categories(&self, page: PageRequest) -> DomainResult<Page<Category>> {
        self.page_of(&self.category_pages, page)
    }

    async fn list_reports(&self, _category_id: &str, page: PageRequest) -> DomainResult<Page<Report>> {
        self.page_of(&self.report_pages, page)
    }

    async fn get_report(&self, category_id: &str, report_id: &str) -> DomainResult<Report> {
        self.reports
            .get(report_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/report-category/{category_id}/reports/{report_id}")))
    }

    async fn get_report_data(
        &self,
        request: &ReportDataRequest,
        page: PageRequest,
    ) -> DomainResult<ReportData> {
        self.data_requests.lock().unwrap().push((request.clone(), page));
        self.data.get(&request.report_id).cloned().ok_or_else(|| {
            not_found(format!(
                "/report-category/{}/reports/{}/data",
                request.category_id, request.report_id
            ))
        })
    }
}

/// Calls received by [`RecordingPublisher`].
#[derive(Debug, Clone, PartialEq)]
pub enum PublishCall {
    FindOrCreate(DatasetSchema),
    Replace(String, Vec<DatasetRow>),
    Append(String, Vec<DatasetRow>),
}

/// Dataset publisher that records every call.
#[derive(Default)]
pub struct RecordingPublisher {
    calls: Mutex<Vec<PublishCall>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatasetPublisher for RecordingPublisher {
    async fn find_or_create(&self, schema: &DatasetSchema) -> DomainResult<()> {
        self.calls.lock().unwrap().push(PublishCall::FindOrCreate(schema.clone()));
        Ok(())
    }

    async fn replace_rows(&self, schema: &DatasetSchema, rows: &[DatasetRow]) -> DomainResult<()> {
        self.calls.lock().unwrap().push(PublishCall::Replace(schema.name.clone(), rows.to_vec()));
        Ok(())
    }

    async fn append_rows(&self, schema: &DatasetSchema, rows: &[DatasetRow]) -> DomainResult<()> {
        self.calls.lock().unwrap().push(PublishCall::Append(schema.name.clone(), rows.to_vec()));
        Ok(())
    }
}
