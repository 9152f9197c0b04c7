//! Dataset API integration (Geckoboard datasets)

pub mod client;

pub use client::GeckoboardClient;
