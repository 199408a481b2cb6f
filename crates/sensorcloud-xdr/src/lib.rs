//! XDR binary codec for the SensorCloud wire format.
//!
//! The format is big-endian and 4-byte aligned: fixed-width numerics are
//! written as-is, while variable-length data is prefixed with a 4-byte
//! length and zero-padded up to the next multiple of 4 bytes.
//!
//! - [`XdrWriter`] - Encodes values into a growing byte buffer
//! - [`XdrReader`] - Decodes values from a borrowed byte slice

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/lord-microstrain/sensorcloud-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod reader;
mod writer;

pub use error::XdrError;
pub use reader::XdrReader;
pub use writer::XdrWriter;
