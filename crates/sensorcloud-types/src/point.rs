//! Time-series data point representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of nanoseconds in one second.
pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;

/// A single data point in a time series: a UTC timestamp paired with a value.
///
/// The timestamp is stored as nanoseconds since the Unix epoch, which carries
/// more resolution than [`DateTime`]; use [`Point::timestamp_nanoseconds`]
/// when full precision matters.
///
/// Equality is exact equality of both fields, with no tolerance on the value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    timestamp_ns: u64,
    value: f32,
}

impl Point {
    /// Creates a point from a Unix timestamp in nanoseconds.
    #[must_use]
    pub const fn new(timestamp_ns: u64, value: f32) -> Self {
        Self {
            timestamp_ns,
            value,
        }
    }

    /// Creates a point from a calendar timestamp, truncated to 100 ns
    /// granularity.
    ///
    /// For any instant representable at 100 ns granularity this produces the
    /// same nanosecond timestamp as [`Point::new`] with the equivalent raw
    /// value. Returns `None` if the timestamp predates the Unix epoch.
    #[must_use]
    pub fn from_datetime(timestamp: DateTime<Utc>, value: f32) -> Option<Self> {
        let ticks =
            timestamp.timestamp() * 10_000_000 + i64::from(timestamp.timestamp_subsec_nanos() / 100);
        if ticks < 0 {
            return None;
        }
        Some(Self {
            timestamp_ns: ticks as u64 * 100,
            value,
        })
    }

    /// Returns the timestamp as nanoseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp_nanoseconds(&self) -> u64 {
        self.timestamp_ns
    }

    /// Returns the timestamp as a [`DateTime`].
    ///
    /// The point stores more resolution than `DateTime` can represent for
    /// timestamps past the year 2262; within that range the conversion is
    /// exact.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.timestamp_ns as i64)
    }

    /// Returns the sub-second portion of the timestamp, in the range
    /// `0..1_000_000_000`.
    #[must_use]
    pub const fn subsec_nanoseconds(&self) -> u64 {
        self.timestamp_ns % NANOSECONDS_PER_SECOND
    }

    /// Returns the point's value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }
}
