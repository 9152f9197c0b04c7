//! HTTP transport shared by the API adapters

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
