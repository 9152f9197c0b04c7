//! Report parameter resolution
//!
//! Configured bindings are checked against the report's declared parameters
//! and date keywords (`NOW`, `NOW-7`, `CURRENT_MONTH_DAY1`) are expanded
//! before the report-data request is built.

pub mod keywords;

use std::sync::Arc;

use chrono_tz::Tz;
use reportsync_domain::{ParameterBinding, ParameterValue, Report, Result, SyncError};
use serde_json::Value;
use tracing::debug;

pub use self::keywords::KeywordContext;
use crate::ports::Clock;

/// Resolves configured parameter bindings for one report.
pub struct ParameterResolver {
    clock: Arc<dyn Clock>,
    zone: Option<Tz>,
}

impl ParameterResolver {
    /// `zone` of `None` evaluates keywords in process-local time.
    pub fn new(clock: Arc<dyn Clock>, zone: Option<Tz>) -> Self {
        Self { clock, zone }
    }

    /// Resolve every binding, failing on the first name the report does not declare.
    pub fn resolve(
        &self,
        report: &Report,
        bindings: &[ParameterBinding],
    ) -> Result<Vec<ParameterValue>> {
        let ctx = KeywordContext { now: self.clock.now(), zone: self.zone };

        bindings
            .iter()
            .map(|binding| {
                let declared = report.parameter(&binding.name).ok_or_else(|| {
                    SyncError::Parameter { parameter: binding.name.clone(), report_id: report.id }
                })?;

                let value = match &binding.value {
                    Value::String(raw) if declared.is_date() => {
                        match keywords::substitute(raw, &ctx) {
                            Some(resolved) => {
                                debug!(parameter = %binding.name, keyword = %raw, %resolved, "Resolved date keyword");
                                Value::String(resolved)
                            }
                            None => binding.value.clone(),
                        }
                    }
                    other => other.clone(),
                };

                Ok(ParameterValue { name: binding.name.clone(), value })
            })
            .collect()
    }
}
