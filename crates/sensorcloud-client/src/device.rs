//! Device-level resource calls.

use reqwest::StatusCode;

use crate::client::{API_VERSION, Client, XDR_CONTENT_TYPE};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::sensor::Sensor;
use crate::transport::RequestOptions;
use crate::wire;

/// A SensorCloud device account: the root of the resource hierarchy.
///
/// All sensor and channel calls for the account go through the device's
/// [`Client`].
#[derive(Debug)]
pub struct Device {
    client: Client,
}

impl Device {
    /// Opens a device using the default transport.
    ///
    /// No network traffic happens until the first call; authentication runs
    /// lazily on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn open(
        device_id: impl Into<String>,
        device_key: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            client: Client::new(device_id, device_key, config)?,
        })
    }

    /// Wraps an already-constructed client, e.g. one with a custom
    /// transport.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Checks whether a sensor exists for this device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] for any status other than
    /// `200 OK` or `404 Not Found`.
    pub fn has_sensor(&self, sensor_name: &str) -> Result<bool> {
        let response = self.client.get(
            &format!("/sensors/{sensor_name}/"),
            RequestOptions::new()
                .param("version", API_VERSION)
                .accept(XDR_CONTENT_TYPE),
        )?;

        match response.status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Error::unexpected("has sensor", &response)),
        }
    }

    /// Adds a sensor with empty attributes.
    ///
    /// # Errors
    ///
    /// See [`Device::add_sensor_with_attributes`].
    pub fn add_sensor(&self, sensor_name: &str) -> Result<Sensor<'_>> {
        self.add_sensor_with_attributes(sensor_name, "", "", "")
    }

    /// Adds a sensor with the given type, label, and description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] unless the service answers
    /// `201 Created`.
    pub fn add_sensor_with_attributes(
        &self,
        sensor_name: &str,
        sensor_type: &str,
        label: &str,
        description: &str,
    ) -> Result<Sensor<'_>> {
        let payload = wire::encode_sensor_attributes(sensor_type, label, description);
        let response = self.client.put(
            &format!("/sensors/{sensor_name}/"),
            RequestOptions::new()
                .param("version", API_VERSION)
                .content_type(XDR_CONTENT_TYPE)
                .body(payload),
        )?;

        if response.status != StatusCode::CREATED {
            return Err(Error::unexpected("add sensor", &response));
        }
        Ok(self.sensor(sensor_name))
    }

    /// Deletes a sensor. The service requires its channels to be deleted
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] unless the service answers
    /// `204 No Content`.
    pub fn delete_sensor(&self, sensor_name: &str) -> Result<()> {
        let response = self.client.delete(
            &format!("/sensors/{sensor_name}/"),
            RequestOptions::new().param("version", API_VERSION),
        )?;

        if response.status != StatusCode::NO_CONTENT {
            return Err(Error::unexpected("delete sensor", &response));
        }
        Ok(())
    }

    /// Returns a handle to a sensor.
    ///
    /// This always succeeds locally; a sensor that does not exist on the
    /// service surfaces as an error from the first call made through the
    /// handle.
    #[must_use]
    pub fn sensor(&self, sensor_name: &str) -> Sensor<'_> {
        Sensor::new(self, sensor_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_has_sensor_maps_status_codes() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::OK, b""),
            response(StatusCode::NOT_FOUND, b""),
            response(StatusCode::INTERNAL_SERVER_ERROR, b"oops"),
        ]));
        let device = device(&transport);

        assert!(device.has_sensor("s1").unwrap());
        assert!(!device.has_sensor("s2").unwrap());
        assert!(matches!(
            device.has_sensor("s3"),
            Err(Error::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn test_add_sensor_puts_attribute_record() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::CREATED, b""),
        ]));
        let device = device(&transport);

        let sensor = device
            .add_sensor_with_attributes("s1", "thermocouple", "Boiler", "north wall")
            .unwrap();
        assert_eq!(sensor.name(), "s1");

        let call = &transport.calls()[1];
        assert_eq!(call.method, crate::Method::Put);
        assert!(call.url.ends_with("/sensors/s1/"));
        assert_eq!(
            call.body.as_deref().unwrap(),
            wire::encode_sensor_attributes("thermocouple", "Boiler", "north wall")
        );
    }

    #[test]
    fn test_delete_sensor_expects_no_content() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::NO_CONTENT, b""),
        ]));
        let device = device(&transport);

        device.delete_sensor("s1").unwrap();

        let call = &transport.calls()[1];
        assert_eq!(call.method, crate::Method::Delete);
        assert!(call.url.ends_with("/sensors/s1/"));
        assert!(call.has_param("version", "1"));
    }

    #[test]
    fn test_delete_sensor_rejects_other_statuses() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::NOT_FOUND, b"no such sensor"),
        ]));
        let device = device(&transport);

        assert!(matches!(
            device.delete_sensor("s1"),
            Err(Error::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn test_add_sensor_rejects_non_created() {
        let transport = Arc::new(MockTransport::scripted([
            auth_response("tok", "api.example.com"),
            response(StatusCode::CONFLICT, b"exists"),
        ]));
        let device = device(&transport);

        assert!(matches!(
            device.add_sensor("s1"),
            Err(Error::UnexpectedResponse { .. })
        ));
    }
}
