//! Application constants

use std::time::Duration;

pub use crate::types::report::{DEFAULT_PAGE_SIZE, MAX_REPORT_DATA_ROWS};
pub use crate::types::session::EXPIRY_BUFFER_SECS;

/// Pause after each entry whose report data was requested.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(300);

/// Per-request timeout for both remote APIs.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest batch accepted by the dataset append endpoint.
pub const MAX_APPEND_BATCH: usize = 500;

pub const REPORTING_PROVIDER: &str = "ServiceTitan";
pub const DATASET_PROVIDER: &str = "Geckoboard";

pub const DEFAULT_AUTH_BASE_URL: &str = "https://auth.servicetitan.io";
pub const DEFAULT_REPORTING_BASE_URL: &str = "https://api.servicetitan.io/reporting/v2/tenant";
pub const DEFAULT_DATASET_BASE_URL: &str = "https://api.geckoboard.com";
