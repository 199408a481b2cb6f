//! Inclusive nanosecond timestamp ranges.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::TimeRangeError;
use crate::point::NANOSECONDS_PER_SECOND;

/// An inclusive range of Unix timestamps in nanoseconds, used to scope
/// time-series queries.
///
/// A range is immutable; narrowing or widening a query means constructing a
/// new range rather than mutating an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start_ns: u64,
    end_ns: u64,
}

impl TimeRange {
    /// Creates a new time range, validating that `start_ns <= end_ns`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start_ns > end_ns`.
    pub const fn new(start_ns: u64, end_ns: u64) -> Result<Self, TimeRangeError> {
        if start_ns > end_ns {
            return Err(TimeRangeError::InvalidRange { start_ns, end_ns });
        }
        Ok(Self { start_ns, end_ns })
    }

    /// Creates a range from calendar timestamps, at nanosecond precision.
    ///
    /// # Errors
    ///
    /// Returns an error if either timestamp predates the Unix epoch or if
    /// `start > end`.
    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, TimeRangeError> {
        Self::new(to_nanoseconds(start)?, to_nanoseconds(end)?)
    }

    /// The range covering every representable timestamp.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start_ns: 0,
            end_ns: u64::MAX,
        }
    }

    /// Returns the inclusive start of the range in nanoseconds.
    #[must_use]
    pub const fn start_nanoseconds(&self) -> u64 {
        self.start_ns
    }

    /// Returns the inclusive end of the range in nanoseconds.
    #[must_use]
    pub const fn end_nanoseconds(&self) -> u64 {
        self.end_ns
    }

    /// Returns true if the range contains the given timestamp.
    #[must_use]
    pub const fn contains(&self, timestamp_ns: u64) -> bool {
        timestamp_ns >= self.start_ns && timestamp_ns <= self.end_ns
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}ns, {}ns]", self.start_ns, self.end_ns)
    }
}

fn to_nanoseconds(timestamp: DateTime<Utc>) -> Result<u64, TimeRangeError> {
    let seconds = timestamp.timestamp();
    if seconds < 0 {
        return Err(TimeRangeError::BeforeEpoch);
    }
    Ok(seconds as u64 * NANOSECONDS_PER_SECOND + u64::from(timestamp.timestamp_subsec_nanos()))
}
