//! Shared test helpers for `reportsync-core` integration tests.
//!
//! In-memory stand-ins for the reporting and dataset ports plus report
//! fixtures, so tests can focus on pipeline behaviour.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;
