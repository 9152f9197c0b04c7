//! Reporting API authentication
//!
//! Acquires client-credentials tokens and caches the resulting session until
//! it is within the expiry buffer.

use std::sync::Arc;

use async_trait::async_trait;
use reportsync_core::ports::{Clock, SystemClock};
use reportsync_domain::{ConfigError, ReportingCredentials, Result, Session, SyncError};
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::read_json;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Client-credentials auth service with a cached session.
pub struct ReportingAuthService {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    clock: Arc<dyn Clock>,
    session: Mutex<Option<Session>>,
}

impl ReportingAuthService {
    /// Create the service, rejecting incomplete credentials.
    ///
    /// # Errors
    ///
    /// Returns a config error listing every missing credential.
    pub fn new(
        credentials: &ReportingCredentials,
        http: HttpClient,
        auth_base_url: &str,
    ) -> Result<Self> {
        let missing = credentials.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::new("servicetitan", missing).into());
        }

        Ok(Self {
            http,
            token_url: format!("{}/connect/token", auth_base_url.trim_end_matches('/')),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            clock: Arc::new(SystemClock),
            session: Mutex::new(None),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return a valid token, acquiring a new session when needed.
    ///
    /// The lock is held across the refresh so concurrent callers wait for a
    /// single token request. On failure the previous session stays cached.
    pub async fn ensure_valid_token(&self) -> Result<String> {
        let mut guard = self.session.lock().await;

        if let Some(session) = guard.as_ref() {
            if !session.is_expired_at(self.clock.now()) {
                return Ok(session.token.clone());
            }
            debug!(expires_at = %session.expires_at, "Cached session expired");
        }

        let session = self.request_token().await.map_err(|err| {
            warn!(error = %err, "Token request failed");
            SyncError::auth(err)
        })?;
        let token = session.token.clone();
        *guard = Some(session);
        Ok(token)
    }

    /// Snapshot of the cached session, if any.
    pub async fn current_session(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    #[instrument(skip(self))]
    async fn request_token(&self) -> Result<Session> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let request = self.http.request(Method::POST, &self.token_url).form(&form);
        let response = self.http.send(request).await?;
        let token: TokenResponse = read_json(response).await?;

        let session = Session::issued(token.access_token, self.clock.now(), token.expires_in)
            .ok_or_else(|| {
                SyncError::Decode(format!("token expires_in out of range: {}", token.expires_in))
            })?;
        info!(expires_at = %session.expires_at, "Acquired reporting API session");
        Ok(session)
    }
}

#[async_trait]
impl AccessTokenProvider for ReportingAuthService {
    async fn access_token(&self) -> Result<String> {
        self.ensure_valid_token().await
    }
}
