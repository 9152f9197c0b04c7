//! Error types used throughout the sync pipeline

use std::fmt;

use thiserror::Error;

/// Non-success response returned by one of the remote APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// Human readable provider name (e.g. "ServiceTitan").
    pub provider: String,
    pub status_code: u16,
    pub request_path: String,
    /// Response body, or the provider's error message when one was extracted.
    pub body: String,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error: {} got response code {} for request path {}",
            self.provider, self.body, self.status_code, self.request_path
        )
    }
}

/// Validation failure for one configuration section.
///
/// All problems found in the section are kept so the user can fix them in a
/// single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    scope: String,
    messages: Vec<String>,
}

impl ConfigError {
    pub fn new(scope: impl Into<String>, messages: Vec<String>) -> Self {
        Self { scope: scope.into(), messages }
    }

    pub fn single(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(scope, vec![message.into()])
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config section {:?} errors:\n - {}", self.scope, self.messages.join("\n - "))
    }
}

impl std::error::Error for ConfigError {}

/// Main error type for reportsync
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Token acquisition failed; wraps the underlying API, decode or network error.
    #[error("Authentication error: {0}")]
    Auth(#[source] Box<SyncError>),

    #[error("{0}")]
    Api(ApiFailure),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("invalid param {parameter:?} for report {report_id}")]
    Parameter { parameter: String, report_id: i64 },

    /// Transport-level failure (DNS, refused connection, timeout, bad scheme).
    #[error("Network error: {0}")]
    Network(String),

    /// A contract between the reporting API and the mapper was broken.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SyncError {
    /// Wrap an error raised while acquiring a session token.
    pub fn auth(inner: SyncError) -> Self {
        Self::Auth(Box::new(inner))
    }

    /// Stable label suitable for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Auth(_) => "auth",
            Self::Api(_) => "api",
            Self::Decode(_) => "decode",
            Self::Parameter { .. } => "parameter",
            Self::Network(_) => "network",
            Self::Internal(_) => "internal",
        }
    }

    /// HTTP status carried by this error, looking through auth wrapping.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(failure) => Some(failure.status_code),
            Self::Auth(inner) => inner.status_code(),
            _ => None,
        }
    }
}

/// Result type alias for reportsync operations
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_failure_renders_provider_message() {
        let failure = ApiFailure {
            provider: "ServiceTitan".into(),
            status_code: 404,
            request_path: "/report-categories".into(),
            body: "Not found".into(),
        };

        assert_eq!(
            failure.to_string(),
            "ServiceTitan error: Not found got response code 404 for request path /report-categories"
        );
    }

    #[test]
    fn config_error_lists_every_message() {
        let err = ConfigError::new(
            "servicetitan",
            vec!["missing attr_a".to_string(), "missing attr_b".to_string()],
        );

        assert_eq!(
            err.to_string(),
            "Config section \"servicetitan\" errors:\n - missing attr_a\n - missing attr_b"
        );
    }

    #[test]
    fn parameter_error_names_parameter_and_report() {
        let err = SyncError::Parameter { parameter: "From".into(), report_id: 2222 };
        assert_eq!(err.to_string(), "invalid param \"From\" for report 2222");
        assert_eq!(err.kind(), "parameter");
    }

    #[test]
    fn auth_error_exposes_inner_status() {
        let err = SyncError::auth(SyncError::Api(ApiFailure {
            provider: "ServiceTitan".into(),
            status_code: 401,
            request_path: "/connect/token".into(),
            body: "bad client".into(),
        }));

        assert_eq!(err.kind(), "auth");
        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().starts_with("Authentication error: ServiceTitan error"));
    }
}
