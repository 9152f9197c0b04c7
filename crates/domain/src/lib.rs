//! # ReportSync Domain
//!
//! Data types shared by every reportsync crate.
//!
//! This crate contains:
//! - Reporting API resources (categories, reports, report data)
//! - Destination dataset schema and row types
//! - Configuration structures and their validation
//! - Error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other reportsync crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
