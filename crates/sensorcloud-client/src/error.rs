//! Client error taxonomy.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use sensorcloud_xdr::XdrError;

use crate::transport::{HttpResponse, TransportError};

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The structured error body SensorCloud attaches to failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceErrorDetail {
    /// The service error code, e.g. `404-001`.
    #[serde(rename = "errorcode")]
    pub code: Option<String>,
    /// Human-readable description of the failure.
    pub message: Option<String>,
}

impl fmt::Display for ServiceErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.code.as_deref().unwrap_or("<no code>"),
            self.message.as_deref().unwrap_or("<no message>"),
        )
    }
}

/// Errors surfaced by the client.
///
/// Decode and transport failures are never retried; the only built-in
/// recovery is the single reauthenticate-and-retry cycle the pipeline runs
/// on a `403 Forbidden` response.
#[derive(Error, Debug)]
pub enum Error {
    /// The response payload could not be decoded (malformed or hostile).
    #[error(transparent)]
    Decode(#[from] XdrError),

    /// The authentication handshake was rejected by the server.
    #[error("authentication failed: {body}")]
    AuthenticationFailed {
        /// The raw response body, for diagnostics.
        body: String,
    },

    /// The service answered with a status the calling layer did not
    /// anticipate.
    #[error("{operation} failed: http status {status}: {body}")]
    UnexpectedResponse {
        /// What the caller was doing when the response came back.
        operation: String,
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body as text, for diagnostics.
        body: String,
        /// The parsed SensorCloud error record, when the body carried one.
        detail: Option<ServiceErrorDetail>,
    },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Builds an [`Error::UnexpectedResponse`] from a raw response,
    /// extracting the SensorCloud JSON error record when one is present.
    pub(crate) fn unexpected(operation: &str, response: &HttpResponse) -> Self {
        let detail = if response.status.is_client_error() || response.status.is_server_error() {
            serde_json::from_slice(&response.body).ok()
        } else {
            None
        };
        Self::UnexpectedResponse {
            operation: operation.to_owned(),
            status: response.status,
            body: response.text(),
            detail,
        }
    }
}
