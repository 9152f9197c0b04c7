//! Dataset schema and row mapping

pub mod builder;
pub mod naming;

pub use builder::DatasetBuilder;
pub use naming::{dataset_name, field_key};
