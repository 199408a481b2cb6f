//! Sample rate representation.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::error::SampleRateError;
use crate::point::NANOSECONDS_PER_SECOND;

/// The unit a [`SampleRate`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    /// Samples per second.
    Hertz,
    /// Seconds per sample.
    Seconds,
}

impl RateKind {
    /// Returns the integer tag used for this kind on the wire.
    #[must_use]
    pub const fn to_wire(self) -> i32 {
        match self {
            Self::Seconds => 0,
            Self::Hertz => 1,
        }
    }

    /// Parses the wire tag back into a kind.
    #[must_use]
    pub const fn from_wire(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(Self::Seconds),
            1 => Some(Self::Hertz),
            _ => None,
        }
    }
}

/// The fixed sampling interval of a time series, expressed either as a
/// frequency (hertz) or as a period (seconds).
///
/// A rate of one sample per second has exactly one representation:
/// [`SampleRate::seconds`] with a rate of 1 is canonicalized to
/// [`SampleRate::hertz`] at construction.
///
/// Ordering and equality compare the sampling interval, with a faster rate
/// considered greater than a slower one. `Option<SampleRate>` orders `None`
/// below any rate.
#[derive(Debug, Clone, Copy)]
pub struct SampleRate {
    kind: RateKind,
    rate: u32,
}

impl SampleRate {
    /// Creates a sample rate in hertz (samples per second).
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is zero.
    pub const fn hertz(rate: u32) -> Result<Self, SampleRateError> {
        if rate == 0 {
            return Err(SampleRateError::Zero);
        }
        Ok(Self {
            kind: RateKind::Hertz,
            rate,
        })
    }

    /// Creates a sample rate in seconds (seconds per sample).
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is zero.
    pub const fn seconds(rate: u32) -> Result<Self, SampleRateError> {
        if rate == 0 {
            return Err(SampleRateError::Zero);
        }
        // 1 second per sample and 1 sample per second are the same rate;
        // keep a single canonical representation.
        let kind = if rate == 1 {
            RateKind::Hertz
        } else {
            RateKind::Seconds
        };
        Ok(Self { kind, rate })
    }

    /// Returns the unit this rate is expressed in.
    #[must_use]
    pub const fn kind(&self) -> RateKind {
        self.kind
    }

    /// Returns the numeric rate in the unit given by [`SampleRate::kind`].
    #[must_use]
    pub const fn rate(&self) -> u32 {
        self.rate
    }

    /// Returns the sampling interval in nanoseconds.
    #[must_use]
    pub const fn interval_nanoseconds(&self) -> u64 {
        match self.kind {
            RateKind::Hertz => NANOSECONDS_PER_SECOND / self.rate as u64,
            RateKind::Seconds => self.rate as u64 * NANOSECONDS_PER_SECOND,
        }
    }

    /// Returns the sampling interval as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_nanos(self.interval_nanoseconds())
    }
}

impl PartialEq for SampleRate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SampleRate {}

impl Ord for SampleRate {
    fn cmp(&self, other: &Self) -> Ordering {
        // A shorter interval means a faster rate, which compares greater.
        other
            .interval_nanoseconds()
            .cmp(&self.interval_nanoseconds())
    }
}

impl PartialOrd for SampleRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for SampleRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.interval_nanoseconds().hash(state);
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.kind {
            RateKind::Hertz => "hertz",
            RateKind::Seconds => "seconds",
        };
        write!(f, "{} {unit}", self.rate)
    }
}
