//! Rust client SDK for the SensorCloud web services.
//!
//! This is a facade crate that re-exports the SensorCloud workspace crates
//! for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use sensorcloud::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let device = Device::open("DEVICE_ID", "DEVICE_KEY", &ClientConfig::default())?;
//!     let sensor = device.sensor("boiler");
//!     let channel = sensor.channel("temperature");
//!
//!     // upload three points sampled at 1 Hz
//!     let rate = SampleRate::hertz(1)?;
//!     let points = [
//!         Point::new(1_000_000_000, 20.0),
//!         Point::new(2_000_000_000, 20.5),
//!         Point::new(3_000_000_000, 21.0),
//!     ];
//!     channel.add_time_series_data(rate, &points)?;
//!
//!     // stream them back lazily
//!     let stream = channel.time_series().range(TimeRange::new(0, 4_000_000_000)?);
//!     for point in &stream {
//!         let point = point?;
//!         println!("{} {}", point.timestamp(), point.value());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/lord-microstrain/sensorcloud-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use sensorcloud_types::*;

// Re-export the XDR codec
pub use sensorcloud_xdr::{XdrError, XdrReader, XdrWriter};

// Re-export the client
pub use sensorcloud_client::{
    API_VERSION, Channel, Client, ClientConfig, DEFAULT_AUTH_SERVER, Device, Error,
    HttpResponse, Method, Points, ReqwestTransport, RequestOptions, Result, Sensor,
    ServiceErrorDetail, TimeSeriesStream, Transport, TransportError, XDR_CONTENT_TYPE, wire,
};

/// Prelude module for convenient imports.
///
/// ```
/// use sensorcloud::prelude::*;
/// ```
pub mod prelude {
    pub use sensorcloud_client::{
        Channel, Client, ClientConfig, Device, Error, RequestOptions, Sensor, TimeSeriesStream,
    };
    pub use sensorcloud_types::{Point, SampleRate, TimeRange};
}
