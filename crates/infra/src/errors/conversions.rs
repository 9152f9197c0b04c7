//! Conversions from external infrastructure errors into domain errors.

use reportsync_domain::{ConfigError, SyncError};
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SyncError);

impl From<InfraError> for SyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SyncError> for InfraError {
    fn from(value: SyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSyncError {
    fn into_sync(self) -> SyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SyncError */
/* -------------------------------------------------------------------------- */

// Status handling happens in the API clients; anything reaching here is a
// transport failure and keeps reqwest's own message.
impl IntoSyncError for HttpError {
    fn into_sync(self) -> SyncError {
        SyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_sync())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → SyncError */
/* -------------------------------------------------------------------------- */

impl IntoSyncError for JsonError {
    fn into_sync(self) -> SyncError {
        SyncError::Decode(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_sync())
    }
}

/* -------------------------------------------------------------------------- */
/* config file parse errors → SyncError */
/* -------------------------------------------------------------------------- */

impl IntoSyncError for serde_yaml::Error {
    fn into_sync(self) -> SyncError {
        ConfigError::single("file", format!("Invalid YAML format: {self}")).into()
    }
}

impl From<serde_yaml::Error> for InfraError {
    fn from(value: serde_yaml::Error) -> Self {
        InfraError(value.into_sync())
    }
}

impl IntoSyncError for toml::de::Error {
    fn into_sync(self) -> SyncError {
        ConfigError::single("file", format!("Invalid TOML format: {self}")).into()
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_sync())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
