//! Channel-level resource calls.

use reqwest::StatusCode;

use sensorcloud_types::{Point, SampleRate, TimeRange};

use crate::client::{API_VERSION, XDR_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::sensor::Sensor;
use crate::timeseries::TimeSeriesStream;
use crate::transport::RequestOptions;
use crate::wire;

/// A data channel on a [`Sensor`].
#[derive(Debug)]
pub struct Channel<'a> {
    sensor: &'a Sensor<'a>,
    name: String,
}

impl<'a> Channel<'a> {
    pub(crate) fn new(sensor: &'a Sensor<'a>, name: impl Into<String>) -> Self {
        Self {
            sensor,
            name: name.into(),
        }
    }

    /// Returns the channel's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uploads time-series data to the channel.
    ///
    /// The points should be in ascending timestamp order and match the
    /// given sample rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] unless the service answers
    /// `201 Created`.
    pub fn add_time_series_data(&self, rate: SampleRate, points: &[Point]) -> Result<()> {
        let payload = wire::encode_time_series(rate, points);
        let response = self.sensor.client().put(
            &format!(
                "/sensors/{}/channels/{}/streams/timeseries/data/",
                self.sensor.name(),
                self.name
            ),
            RequestOptions::new()
                .param("version", API_VERSION)
                .content_type(XDR_CONTENT_TYPE)
                .body(payload),
        )?;

        if response.status != StatusCode::CREATED {
            return Err(Error::unexpected("add time-series data", &response));
        }
        Ok(())
    }

    /// Returns a lazy stream over every point the channel holds.
    ///
    /// Narrow it with [`TimeSeriesStream::range`].
    #[must_use]
    pub fn time_series(&self) -> TimeSeriesStream<'a> {
        TimeSeriesStream::new(
            self.sensor.client(),
            self.sensor.name(),
            self.name.clone(),
            TimeRange::all(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::device::Device;
    use crate::testing::{MockTransport, auth_response, response};
    use std::sync::Arc;

    fn device(transport: &Arc<MockTransport>) -> Device {
        Device::with_client(Client::with_transport(
            "DEV",
            "KEY",
            "https://auth.example.com",
            Box::new(Arc::clone(transport)),
        ))
    }

    #[test]
    fn test_upload_puts_time_series_record() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::CREATED, b""),
        ]));
        let device = device(&transport);
        let sensor = device.sensor("s1");
        let channel = sensor.channel("ch1");

        let rate = SampleRate::hertz(10).unwrap();
        let points = [Point::new(1000, 0.5), Point::new(2000, 1.5)];
        channel.add_time_series_data(rate, &points).unwrap();

        let call = &transport.calls()[1];
        assert_eq!(call.method, crate::Method::Put);
        assert!(
            call.url
                .ends_with("/sensors/s1/channels/ch1/streams/timeseries/data/")
        );
        assert_eq!(
            call.body.as_deref().unwrap(),
            wire::encode_time_series(rate, &points)
        );
    }

    #[test]
    fn test_upload_rejects_non_created() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::BAD_REQUEST, b"unordered points"),
        ]));
        let device = device(&transport);
        let sensor = device.sensor("s1");
        let channel = sensor.channel("ch1");

        let error = channel
            .add_time_series_data(SampleRate::hertz(1).unwrap(), &[Point::new(0, 0.0)])
            .unwrap_err();
        assert!(matches!(error, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_time_series_covers_full_range() {
        let transport = Arc::new(MockTransport::scripted([]));
        let device = device(&transport);
        let sensor = device.sensor("s1");
        let channel = sensor.channel("ch1");

        let stream = channel.time_series();
        assert_eq!(stream.time_range(), TimeRange::all());
    }
}
