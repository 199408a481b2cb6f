//! HTTP transport seam.
//!
//! The pipeline talks to the network through the [`Transport`] trait so that
//! tests can script responses without a server. [`ReqwestTransport`] is the
//! production implementation.

use std::fmt;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::config::ClientConfig;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl Method {
    /// Returns the method as its wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The options for a single HTTP request, built up incrementally and
/// consumed exactly once per physical request.
///
/// Query parameters keep their insertion order. The builder methods chain,
/// matching how call sites read in the rest of the crate:
///
/// ```
/// use sensorcloud_client::RequestOptions;
///
/// let options = RequestOptions::new()
///     .param("version", "1")
///     .param("starttime", 0u64)
///     .accept("application/xdr");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query_params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestOptions {
    /// Creates empty request options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query string parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((name.into(), value.to_string()));
        self
    }

    /// Adds an HTTP header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the `Accept` header.
    #[must_use]
    pub fn accept(self, content_type: &str) -> Self {
        self.header("Accept", content_type)
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn content_type(self, content_type: &str) -> Self {
        self.header("Content-Type", content_type)
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Returns the headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the request body, if one was set.
    #[must_use]
    pub const fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// Raw metadata and bytes of an HTTP response.
///
/// The transport and pipeline never interpret the body; mapping a status
/// code to success or a domain error is the caller's job.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The response status code.
    pub status: StatusCode,
    /// The `Content-Type` header, when present.
    pub content_type: Option<String>,
    /// The raw response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns the body decoded as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Errors below the HTTP layer: the request never produced a usable
/// response.
///
/// A server-supplied error response is *not* a transport error; those come
/// back as an [`HttpResponse`] with the corresponding status.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying HTTP client failed (connect, timeout, protocol).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-reqwest transport failed to reach the service.
    #[error("connection error: {0}")]
    Connection(String),
}

/// A blocking HTTP transport.
///
/// Implementations send one physical request per call and block until the
/// round trip completes.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] only when no response was obtained;
    /// HTTP error statuses are returned as responses.
    fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        (**self).send(method, url, options)
    }
}

/// The production [`Transport`] backed by a blocking [`reqwest`] client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport configured from the given client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self
            .client
            .request(method, url)
            .query(options.query_params());
        for (name, value) in options.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = options.body_bytes() {
            request = request.body(body.clone());
        }

        let response = request.send()?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes()?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_preserve_param_order() {
        let options = RequestOptions::new()
            .param("version", "1")
            .param("starttime", 100u64)
            .param("endtime", 200u64);

        let names: Vec<&str> = options
            .query_params()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["version", "starttime", "endtime"]);
    }

    #[test]
    fn test_accept_and_content_type_are_headers() {
        let options = RequestOptions::new()
            .accept("application/xdr")
            .content_type("application/xdr");
        assert_eq!(
            options.headers(),
            [
                ("Accept".to_owned(), "application/xdr".to_owned()),
                ("Content-Type".to_owned(), "application/xdr".to_owned()),
            ]
        );
    }

    #[test]
    fn test_body_round_trip() {
        let options = RequestOptions::new().body(vec![1u8, 2, 3]);
        assert_eq!(options.body_bytes().unwrap().as_ref(), [1, 2, 3]);
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new(&ClientConfig::default()).is_ok());
    }
}
