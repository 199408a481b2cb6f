//! Error types for value construction.

use thiserror::Error;

/// Error for invalid sample rates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRateError {
    /// A sample rate must describe at least one sample.
    #[error("sample rate must be a positive integer")]
    Zero,
}

/// Error for invalid time ranges.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRangeError {
    /// Start timestamp is after the end timestamp.
    #[error("invalid time range: start {start_ns} > end {end_ns}")]
    InvalidRange {
        /// The start timestamp in nanoseconds.
        start_ns: u64,
        /// The end timestamp in nanoseconds.
        end_ns: u64,
    },

    /// A calendar timestamp predates the Unix epoch.
    #[error("timestamp is before the Unix epoch (Jan 1, 1970 UTC)")]
    BeforeEpoch,
}
