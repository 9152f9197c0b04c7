//! # ReportSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the reporting and dataset APIs
//! - Parameter resolution (date keywords)
//! - Report-to-dataset schema and row mapping
//! - The per-cycle sync service and catalog listings
//!
//! ## Architecture Principles
//! - Only depends on `reportsync-domain`
//! - No HTTP, filesystem or environment access
//! - All external dependencies via traits

pub mod catalog;
pub mod dataset;
pub mod parameters;
pub mod ports;
pub mod sync;

pub use dataset::DatasetBuilder;
pub use parameters::ParameterResolver;
pub use ports::{Clock, DatasetPublisher, FixedClock, ReportingClient, SystemClock};
pub use sync::{CycleSummary, SyncConfig, SyncService};
