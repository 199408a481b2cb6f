//! Record-level encode/decode for the SensorCloud wire format.
//!
//! These helpers sit between the raw XDR codec and the resource layer:
//! each function encodes or decodes one logical record type exchanged with
//! the service.

use thiserror::Error;

use sensorcloud_types::{Point, RateKind, SampleRate};
use sensorcloud_xdr::{XdrError, XdrReader, XdrWriter};

/// Size of one `(uint64 timestamp, float32 value)` pair on the wire.
pub const POINT_WIRE_SIZE: usize = 12;

/// Version tag carried by every versioned record.
pub const RECORD_VERSION: i32 = 1;

/// Tokens are generally about 60 characters; limit the read so a protocol
/// error cannot make us allocate far more.
const TOKEN_LIMIT: usize = 1000;

/// Maximum length of a fully qualified domain name.
const HOST_LIMIT: usize = 255;

/// Errors from decoding a versioned record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The underlying XDR data was malformed.
    #[error(transparent)]
    Xdr(#[from] XdrError),

    /// The record declares a version this client does not understand.
    #[error("unsupported record version {0}")]
    UnsupportedVersion(i32),

    /// The sample-rate kind tag is not a known value.
    #[error("unknown sample-rate kind {0}")]
    UnknownRateKind(i32),

    /// The sample-rate value is not a positive integer.
    #[error("invalid sample-rate value {0}")]
    InvalidRate(i32),

    /// The declared point count is negative or does not match the payload.
    #[error("invalid point count {0}")]
    InvalidPointCount(i32),
}

/// Decodes the authentication handshake response into `(token, host)`.
///
/// The body carries two opaque strings and no version field.
///
/// # Errors
///
/// Returns an error if either field is truncated, over-long, or not UTF-8.
pub fn decode_auth_response(bytes: &[u8]) -> Result<(String, String), XdrError> {
    let mut reader = XdrReader::new(bytes);
    let token = reader.read_string(TOKEN_LIMIT)?;
    let host = reader.read_string(HOST_LIMIT)?;
    Ok((token, host))
}

/// Encodes the attribute record used when creating a sensor:
/// version, type, label, description.
#[must_use]
pub fn encode_sensor_attributes(sensor_type: &str, label: &str, description: &str) -> Vec<u8> {
    let mut writer = XdrWriter::new();
    writer.write_int32(RECORD_VERSION);
    writer.write_string(sensor_type);
    writer.write_string(label);
    writer.write_string(description);
    writer.into_bytes()
}

/// Encodes the attribute record used when creating a channel:
/// version, label, description.
#[must_use]
pub fn encode_channel_attributes(label: &str, description: &str) -> Vec<u8> {
    let mut writer = XdrWriter::new();
    writer.write_int32(RECORD_VERSION);
    writer.write_string(label);
    writer.write_string(description);
    writer.into_bytes()
}

/// Encodes a time-series upload record: version, sample-rate kind and value,
/// point count, then each point as a `(uint64, float32)` pair.
#[must_use]
pub fn encode_time_series(rate: SampleRate, points: &[Point]) -> Vec<u8> {
    let mut writer = XdrWriter::with_capacity(16 + points.len() * POINT_WIRE_SIZE);
    writer.write_int32(RECORD_VERSION);
    writer.write_int32(rate.kind().to_wire());
    writer.write_int32(rate.rate() as i32);
    writer.write_int32(points.len() as i32);
    for point in points {
        writer.write_uint64(point.timestamp_nanoseconds());
        writer.write_float32(point.value());
    }
    writer.into_bytes()
}

/// Decodes a time-series upload record back into its sample rate and points.
///
/// This is the inverse of [`encode_time_series`].
///
/// # Errors
///
/// Returns an error on truncated data, an unsupported version, an invalid
/// sample-rate field, or a point count that does not match the payload.
pub fn decode_time_series(bytes: &[u8]) -> Result<(SampleRate, Vec<Point>), RecordError> {
    let mut reader = XdrReader::new(bytes);

    let version = reader.read_int32()?;
    if version != RECORD_VERSION {
        return Err(RecordError::UnsupportedVersion(version));
    }

    let kind_tag = reader.read_int32()?;
    let kind = RateKind::from_wire(kind_tag).ok_or(RecordError::UnknownRateKind(kind_tag))?;
    let rate_value = reader.read_int32()?;
    let rate_value_u32 =
        u32::try_from(rate_value).map_err(|_| RecordError::InvalidRate(rate_value))?;
    let rate = match kind {
        RateKind::Hertz => SampleRate::hertz(rate_value_u32),
        RateKind::Seconds => SampleRate::seconds(rate_value_u32),
    }
    .map_err(|_| RecordError::InvalidRate(rate_value))?;

    // Validate the declared count against the bytes actually present before
    // reserving anything, so a hostile header cannot force a huge allocation.
    let declared = reader.read_int32()?;
    let count = usize::try_from(declared)
        .ok()
        .filter(|count| count.checked_mul(POINT_WIRE_SIZE) == Some(reader.remaining()))
        .ok_or(RecordError::InvalidPointCount(declared))?;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let timestamp = reader.read_uint64()?;
        let value = reader.read_float32()?;
        points.push(Point::new(timestamp, value));
    }

    Ok((rate, points))
}

/// Decodes a download chunk: a flat sequence of `(uint64 timestamp,
/// float32 value)` pairs with no length prefix, terminated by end-of-data.
///
/// Running out of bytes ends the chunk normally; a partial trailing pair is
/// dropped rather than reported, matching the service's framing where a
/// well-formed chunk always ends on a pair boundary.
#[must_use]
pub fn decode_point_stream(bytes: &[u8]) -> Vec<Point> {
    let mut reader = XdrReader::new(bytes);
    let mut points = Vec::with_capacity(bytes.len() / POINT_WIRE_SIZE);

    loop {
        let Ok(timestamp) = reader.read_uint64() else {
            break;
        };
        let Ok(value) = reader.read_float32() else {
            break;
        };
        points.push(Point::new(timestamp, value));
    }

    points
}
