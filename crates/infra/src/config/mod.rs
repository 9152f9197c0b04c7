//! Configuration loading
//!
//! This module loads the sync configuration from disk and resolves
//! environment placeholders. Validation rules live in the domain crate.

pub mod loader;

// Re-export commonly used items
pub use loader::{
    load_and_validate, load_from_file, probe_config_paths, resolve_placeholders, write_template,
};
