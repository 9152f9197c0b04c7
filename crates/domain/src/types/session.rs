//! Reporting API session

use chrono::{DateTime, Duration, TimeDelta, Utc};

/// Seconds before `expires_at` at which a session is treated as expired.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Bearer token issued by the reporting API's token endpoint.
///
/// Sessions are replaced wholesale on refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session issued at `issued_at` and valid for `expires_in` seconds.
    ///
    /// Returns `None` when the expiry falls outside the representable range.
    pub fn issued(
        token: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_in: i64,
    ) -> Option<Self> {
        let lifetime = TimeDelta::try_seconds(expires_in)?;
        let expires_at = issued_at.checked_add_signed(lifetime)?;
        Some(Self { token: token.into(), issued_at, expires_at })
    }

    /// Whether the session must be refreshed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_BUFFER_SECS) >= self.expires_at
    }
}
