//! External service integrations

pub mod dataset;
pub mod reporting;
