//! Wiring from a loaded config to the core services

use std::sync::Arc;

use reportsync_core::ports::SystemClock;
use reportsync_core::{ParameterResolver, ReportingClient, SyncService};
use reportsync_domain::{Config, Result};
use reportsync_infra::{GeckoboardClient, ReportingApiClient};

/// Reporting API client built from the config credentials.
pub fn reporting_client(config: &Config) -> Result<Arc<dyn ReportingClient>> {
    Ok(Arc::new(ReportingApiClient::from_credentials(&config.reporting)?))
}

/// Sync service with real adapters and the wall clock.
pub fn sync_service(config: &Config) -> Result<SyncService> {
    let reporting = reporting_client(config)?;
    let publisher = Arc::new(GeckoboardClient::from_config(&config.datasets)?);
    let resolver = ParameterResolver::new(Arc::new(SystemClock), config.time_zone()?);

    Ok(SyncService::new(reporting, publisher, resolver))
}
