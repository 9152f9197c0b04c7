//! Reporting API client
//!
//! Implements the core [`ReportingClient`] port over HTTP. Every request is
//! authenticated through an [`AccessTokenProvider`] and carries the
//! application key header.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reportsync_core::ports::ReportingClient;
use reportsync_domain::constants::{
    DEFAULT_AUTH_BASE_URL, DEFAULT_REPORTING_BASE_URL, HTTP_TIMEOUT,
};
use reportsync_domain::{
    Category, ConfigError, Page, PageRequest, Report, ReportData, ReportDataRequest,
    ReportingCredentials, Result, SyncError,
};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::auth::{AccessTokenProvider, ReportingAuthService};
use super::read_json;
use crate::http::HttpClient;

const APP_KEY_HEADER: &str = "ST-App-Key";

/// Configuration for the reporting client
#[derive(Debug, Clone)]
pub struct ReportingClientConfig {
    /// Host of the token endpoint (e.g. "https://auth.servicetitan.io")
    pub auth_base_url: String,
    /// Tenant-scoped reporting base URL
    pub api_base_url: String,
    pub app_id: String,
    pub timeout: Duration,
}

impl ReportingClientConfig {
    /// Defaults for the given credentials, honouring any URL overrides.
    pub fn for_credentials(credentials: &ReportingCredentials) -> Self {
        Self {
            auth_base_url: credentials
                .auth_url
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string()),
            api_base_url: credentials.base_url.clone().unwrap_or_else(|| {
                format!("{DEFAULT_REPORTING_BASE_URL}/{}", credentials.tenant_id)
            }),
            app_id: credentials.app_id.clone(),
            timeout: HTTP_TIMEOUT,
        }
    }
}

/// HTTP adapter for the reporting API
pub struct ReportingApiClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: Url,
    app_id: String,
}

impl ReportingApiClient {
    /// Create a client over an existing token provider.
    ///
    /// # Errors
    ///
    /// Returns a config error if the base URL is invalid.
    pub fn new(config: ReportingClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        let base_url = parse_base_url(&config.api_base_url)?;

        Ok(Self { http, auth, base_url, app_id: config.app_id })
    }

    /// Build the client and its auth service from config credentials.
    pub fn from_credentials(credentials: &ReportingCredentials) -> Result<Self> {
        let config = ReportingClientConfig::for_credentials(credentials);
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        let auth = ReportingAuthService::new(credentials, http, &config.auth_base_url)?;

        Self::new(config, Arc::new(auth))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SyncError::Internal(format!("cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.auth.access_token().await?;
        Ok(self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, token)
            .header(APP_KEY_HEADER, &self.app_id))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, page: Option<PageRequest>) -> Result<T> {
        debug!(path = %url.path(), "GET request");
        let mut request = self.authorized(Method::GET, url).await?;
        if let Some(page) = page {
            request = request.query(&page_query(page));
        }
        read_json(self.http.send(request).await?).await
    }
}

fn page_query(page: PageRequest) -> [(&'static str, u32); 2] {
    [("page", page.page), ("pageSize", page.page_size)]
}

fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|err| {
        ConfigError::single("servicetitan", format!("invalid URL {raw:?}: {err}")).into()
    })
}

#[async_trait]
impl ReportingClient for ReportingApiClient {
    #[instrument(skip(self))]
    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>> {
        let url = self.endpoint(&["report-categories"])?;
        self.get(url, Some(page)).await
    }

    #[instrument(skip(self))]
    async fn list_reports(&self, category_id: &str, page: PageRequest) -> Result<Page<Report>> {
        let url = self.endpoint(&["report-category", category_id, "reports"])?;
        self.get(url, Some(page)).await
    }

    #[instrument(skip(self))]
    async fn get_report(&self, category_id: &str, report_id: &str) -> Result<Report> {
        let url = self.endpoint(&["report-category", category_id, "reports", report_id])?;
        self.get(url, None).await
    }

    #[instrument(skip(self, request), fields(category_id = %request.category_id, report_id = %request.report_id))]
    async fn get_report_data(
        &self,
        request: &ReportDataRequest,
        page: PageRequest,
    ) -> Result<ReportData> {
        let url = self.endpoint(&[
            "report-category",
            &request.category_id,
            "reports",
            &request.report_id,
            "data",
        ])?;
        debug!(path = %url.path(), parameters = request.parameters.len(), "POST request");

        let builder =
            self.authorized(Method::POST, url).await?.query(&page_query(page)).json(request);
        read_json(self.http.send(builder).await?).await
    }
}
