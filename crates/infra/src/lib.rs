//! # ReportSync Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transport with bounded timeouts
//! - Reporting API adapter (token sessions, listings, report data)
//! - Dataset API adapter (schemas, replace and append)
//! - Config file loading with environment placeholders
//! - The sync scheduler (run once or loop until cancelled)
//!
//! ## Architecture
//! - Implements traits defined in `reportsync-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod scheduling;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
pub use integrations::dataset::GeckoboardClient;
pub use integrations::reporting::{
    AccessTokenProvider, ReportingApiClient, ReportingAuthService, ReportingClientConfig,
};
pub use scheduling::{RunReport, SchedulerError, SyncScheduler, SyncSchedulerConfig};
