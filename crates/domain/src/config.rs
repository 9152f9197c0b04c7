//! Configuration structures
//!
//! These types mirror the persisted config file. Loading and environment
//! interpolation live in the infra crate; validation lives here so it can be
//! exercised without touching the filesystem.

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConfigError;
use crate::types::{FieldType, WriteMode};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone used to evaluate date keywords. Empty means process-local.
    #[serde(default)]
    pub time_location: String,
    /// Seconds between sync cycles. Zero runs a single cycle.
    #[serde(default)]
    pub refresh_time: u64,
    #[serde(default, alias = "servicetitan")]
    pub reporting: ReportingCredentials,
    #[serde(default, alias = "geckoboard")]
    pub datasets: DatasetApiConfig,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Config {
    /// Validate sections in order, returning the first failing one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_zone()?;

        let missing = self.reporting.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::new("servicetitan", missing));
        }

        if self.datasets.api_key.is_empty() {
            return Err(ConfigError::single("geckoboard", "missing api_key"));
        }

        if self.entries.is_empty() {
            return Err(ConfigError::single("entries", "at least one entry is required"));
        }

        for (idx, entry) in self.entries.iter().enumerate() {
            let messages = entry.validate();
            if !messages.is_empty() {
                return Err(ConfigError::new(format!("entries[{}]", idx + 1), messages));
            }
        }

        Ok(())
    }

    /// Configured zone, or `None` for process-local time.
    pub fn time_zone(&self) -> Result<Option<Tz>, ConfigError> {
        if self.time_location.is_empty() {
            return Ok(None);
        }

        self.time_location.parse::<Tz>().map(Some).map_err(|_| {
            ConfigError::single(
                "time_location",
                format!("unknown time zone {}", self.time_location),
            )
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_time)
    }
}

/// Reporting API client credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingCredentials {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Overrides the token endpoint host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    /// Overrides the tenant-scoped reporting base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ReportingCredentials {
    /// One message per empty credential, in declaration order.
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("app_id", &self.app_id),
            ("tenant_id", &self.tenant_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| format!("missing {name}"))
        .collect()
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for ReportingCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportingCredentials")
            .field("app_id", &self.app_id)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Dataset API settings
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetApiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for DatasetApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// One report-to-dataset mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub report: ReportSelector,
    #[serde(default)]
    pub dataset: DatasetDirectives,
}

impl Entry {
    /// Validation messages, dataset problems first.
    pub fn validate(&self) -> Vec<String> {
        let mut messages = self.dataset.validate();
        messages.extend(self.report.validate());
        messages
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSelector {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub parameters: Vec<ParameterBinding>,
}

impl ReportSelector {
    fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.id.is_empty() {
            messages.push("report id is required".to_string());
        }
        if self.category_id.is_empty() {
            messages.push("category_id is required".to_string());
        }
        messages
    }
}

/// Parameter value bound in config; strings may hold date keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBinding {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDirectives {
    /// Dataset name override; the report name is used when empty.
    #[serde(default)]
    pub name: String,
    /// Write mode as written in the file (`replace` or `append`).
    #[serde(default, rename = "type")]
    pub write_mode: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub field_overrides: Vec<FieldOverride>,
}

impl DatasetDirectives {
    /// Parsed write mode; empty or unrecognised values fall back to replace.
    pub fn mode(&self) -> WriteMode {
        self.write_mode.parse().unwrap_or_default()
    }

    fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.required_fields.is_empty() {
            messages.push(
                "at least one dataset required_field is required, please use the report field \
                 name as the identifier"
                    .to_string(),
            );
        }
        if !self.write_mode.is_empty() && self.write_mode.parse::<WriteMode>().is_err() {
            messages.push(format!(
                "dataset type {:?} is invalid, expected replace or append",
                self.write_mode
            ));
        }
        messages
    }
}

/// Replaces the source type of a report field before type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOverride {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected report id, got {other}"))),
    }
}
