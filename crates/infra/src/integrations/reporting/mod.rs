//! Reporting API integration (ServiceTitan reporting v2)
//!
//! - [`auth`]: client-credentials token acquisition and session caching
//! - [`client`]: [`ReportingClient`](reportsync_core::ReportingClient) adapter

pub mod auth;
pub mod client;

pub use auth::{AccessTokenProvider, ReportingAuthService};
pub use client::{ReportingApiClient, ReportingClientConfig};

use reportsync_domain::constants::REPORTING_PROVIDER;
use reportsync_domain::{ApiFailure, Result, SyncError};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::InfraError;

/// Check for an exact 200 first, then decode the body.
///
/// A response that is both non-200 and malformed reports the status.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let request_path = response.url().path().to_string();
    let body = response.text().await.map_err(|err| SyncError::from(InfraError::from(err)))?;

    if status != StatusCode::OK {
        return Err(SyncError::Api(ApiFailure {
            provider: REPORTING_PROVIDER.to_string(),
            status_code: status.as_u16(),
            request_path,
            body,
        }));
    }

    serde_json::from_str(&body).map_err(|err| InfraError::from(err).into())
}
