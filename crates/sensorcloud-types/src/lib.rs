//! Core types for the SensorCloud client SDK.
//!
//! This crate provides the fundamental data structures shared across the
//! SensorCloud workspace crates:
//!
//! - [`Point`] - A single time-series data point (nanosecond timestamp + value)
//! - [`SampleRate`] - Canonical description of a fixed sampling interval
//! - [`TimeRange`] - An inclusive nanosecond timestamp range

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/lord-microstrain/sensorcloud-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod point;
mod samplerate;
mod time_range;

pub use error::{SampleRateError, TimeRangeError};
pub use point::{NANOSECONDS_PER_SECOND, Point};
pub use samplerate::{RateKind, SampleRate};
pub use time_range::TimeRange;
