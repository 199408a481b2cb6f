//! Sensor-level resource calls.

use reqwest::StatusCode;

use crate::channel::Channel;
use crate::client::{API_VERSION, Client, XDR_CONTENT_TYPE};
use crate::device::Device;
use crate::error::{Error, Result};
use crate::transport::RequestOptions;
use crate::wire;

/// A sensor on a [`Device`].
#[derive(Debug)]
pub struct Sensor<'a> {
    device: &'a Device,
    name: String,
}

impl<'a> Sensor<'a> {
    pub(crate) fn new(device: &'a Device, name: impl Into<String>) -> Self {
        Self {
            device,
            name: name.into(),
        }
    }

    /// Returns the sensor's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) const fn client(&self) -> &'a Client {
        self.device.client()
    }

    /// Checks whether a channel exists on this sensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] for any status other than
    /// `200 OK` or `404 Not Found`.
    pub fn has_channel(&self, channel_name: &str) -> Result<bool> {
        let response = self.client().get(
            &format!("/sensors/{}/channels/{channel_name}/attributes/", self.name),
            RequestOptions::new()
                .param("version", API_VERSION)
                .accept(XDR_CONTENT_TYPE),
        )?;

        match response.status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Error::unexpected("has channel", &response)),
        }
    }

    /// Adds a channel with empty attributes.
    ///
    /// # Errors
    ///
    /// See [`Sensor::add_channel_with_attributes`].
    pub fn add_channel(&self, channel_name: &str) -> Result<Channel<'_>> {
        self.add_channel_with_attributes(channel_name, "", "")
    }

    /// Adds a channel with the given label and description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] unless the service answers
    /// `201 Created`.
    pub fn add_channel_with_attributes(
        &self,
        channel_name: &str,
        label: &str,
        description: &str,
    ) -> Result<Channel<'_>> {
        let payload = wire::encode_channel_attributes(label, description);
        let response = self.client().put(
            &format!("/sensors/{}/channels/{channel_name}/", self.name),
            RequestOptions::new()
                .param("version", API_VERSION)
                .content_type(XDR_CONTENT_TYPE)
                .body(payload),
        )?;

        if response.status != StatusCode::CREATED {
            return Err(Error::unexpected("add channel", &response));
        }
        Ok(self.channel(channel_name))
    }

    /// Deletes a channel and all data associated with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] unless the service answers
    /// `204 No Content`.
    pub fn delete_channel(&self, channel_name: &str) -> Result<()> {
        let response = self.client().delete(
            &format!("/sensors/{}/channels/{channel_name}/", self.name),
            RequestOptions::new().param("version", API_VERSION),
        )?;

        if response.status != StatusCode::NO_CONTENT {
            return Err(Error::unexpected("delete channel", &response));
        }
        Ok(())
    }

    /// Returns a handle to a channel.
    ///
    /// Always succeeds locally, like [`Device::sensor`].
    #[must_use]
    pub fn channel(&self, channel_name: &str) -> Channel<'_> {
        Channel::new(self, channel_name)
    }
}
