//! Scheduling for repeated sync cycles
//!
//! The scheduler follows the usual runtime rules:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support

pub mod error;
pub mod sync_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use sync_scheduler::{RunReport, SyncScheduler, SyncSchedulerConfig};
