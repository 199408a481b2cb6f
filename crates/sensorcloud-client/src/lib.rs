//! Client for the SensorCloud web services.
//!
//! The crate is layered around three pieces:
//!
//! - [`Client`] - Holds the device credentials and authenticated session
//!   state, and runs every request through the one-shot
//!   reauthenticate-and-retry pipeline
//! - [`TimeSeriesStream`] - A lazy, chunked cursor over a timestamp range of
//!   channel data
//! - [`Device`] / [`Sensor`] / [`Channel`] - Thin resource wrappers that
//!   build URLs and XDR payloads on top of the client
//!
//! The HTTP transport is a trait ([`Transport`]) so tests and embedders can
//! substitute the [`reqwest`]-backed default.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/lord-microstrain/sensorcloud-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod channel;
mod client;
mod config;
mod device;
mod error;
mod sensor;
mod timeseries;
mod transport;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use channel::Channel;
pub use client::{API_VERSION, Client, XDR_CONTENT_TYPE};
pub use config::{ClientConfig, DEFAULT_AUTH_SERVER};
pub use device::Device;
pub use error::{Error, Result, ServiceErrorDetail};
pub use sensor::Sensor;
pub use timeseries::{EXPECTED_CHUNK_POINT_CEILING, Points, TimeSeriesStream};
pub use transport::{
    HttpResponse, Method, ReqwestTransport, RequestOptions, Transport, TransportError,
};
