//! Sync orchestration

pub mod service;

pub use service::{CycleSummary, SyncConfig, SyncService};
