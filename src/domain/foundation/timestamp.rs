//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Longest span `minus_hours` will subtract.
const MAX_SPAN_HOURS: i64 = 1_000_000_000;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    ///
    /// Saturates at the earliest representable instant.
    pub fn minus_days(&self, days: u32) -> Self {
        self.minus(Duration::days(i64::from(days)))
    }

    /// Creates a new timestamp by subtracting the specified number of hours.
    ///
    /// Saturates at the earliest representable instant.
    pub fn minus_hours(&self, hours: u64) -> Self {
        let hours = i64::try_from(hours).unwrap_or(i64::MAX).min(MAX_SPAN_HOURS);
        self.minus(Duration::hours(hours))
    }

    fn minus(&self, span: Duration) -> Self {
        Self(
            self.0
                .checked_sub_signed(span)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Out-of-range values collapse to the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        let at = i64::try_from(secs)
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
        Self(at.unwrap_or_default())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
