// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for cache metadata
//!
//! - [`TimestampMillis`]: Unix timestamp in milliseconds, the write instant of a
//!   cache entry and the `timestamp` number in snapshot files

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unix timestamp in milliseconds
///
/// Serialized as a bare JSON number.
///
/// # Examples
///
/// ```
/// use tokenmeta::TimestampMillis;
/// use std::time::Duration;
///
/// let written = TimestampMillis::from_millis(1_000);
/// let later = TimestampMillis::from_millis(61_000);
/// assert_eq!(written.elapsed_until(later), Duration::from_secs(60));
/// assert_eq!(later.elapsed_until(written), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMillis(u64);

impl TimestampMillis {
    /// Creates a new timestamp representing the current time
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    /// Creates a timestamp from a raw millisecond value
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw millisecond value
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Time between this timestamp and a later one
    ///
    /// Returns zero if `later` is actually earlier.
    pub fn elapsed_until(&self, later: TimestampMillis) -> Duration {
        Duration::from_millis(later.0.saturating_sub(self.0))
    }

    /// Returns this timestamp moved forward by `duration`
    #[must_use]
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }

    /// The same instant as a UTC date-time
    pub fn to_datetime(&self) -> DateTime<Utc> {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl From<DateTime<Utc>> for TimestampMillis {
    fn from(value: DateTime<Utc>) -> Self {
        Self(u64::try_from(value.timestamp_millis()).unwrap_or_default())
    }
}
