//! Authenticated session and request pipeline.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::transport::{HttpResponse, Method, ReqwestTransport, RequestOptions, Transport};
use crate::wire;

/// The protocol version sent as the `version` query parameter on every call.
pub const API_VERSION: &str = "1";

/// Content type of the XDR request and response bodies.
pub const XDR_CONTENT_TYPE: &str = "application/xdr";

const AUTH_TOKEN_PARAM: &str = "auth_token";

/// The token and API endpoint obtained from one authentication handshake.
///
/// Replaced wholesale on every (re)authentication so the pair can never mix
/// values from two different handshakes.
#[derive(Debug, Clone)]
struct SessionState {
    token: String,
    api_server: String,
}

/// A connection to SensorCloud for one device.
///
/// The client owns the device credentials and the authenticated session
/// state, and runs every request through the pipeline: inject the current
/// token, send, and on a `403 Forbidden` re-authenticate and retry exactly
/// once. Any other status is handed back to the caller unmodified.
///
/// Authentication is lazy: the first request performs the handshake if none
/// has happened yet. Re-authentication is serialized behind a lock, so a
/// client shared across threads cannot end up with a token from one
/// handshake and an endpoint from another.
pub struct Client {
    transport: Box<dyn Transport>,
    device_id: String,
    device_key: String,
    auth_server: String,
    session: Mutex<Option<SessionState>>,
}

impl Client {
    /// Creates a client using the default [`reqwest`]-backed transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created. No network
    /// traffic happens until the first request.
    pub fn new(
        device_id: impl Into<String>,
        device_key: impl Into<String>,
        config: &ClientConfig,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(
            device_id,
            device_key,
            &config.auth_server,
            Box::new(transport),
        ))
    }

    /// Creates a client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(
        device_id: impl Into<String>,
        device_key: impl Into<String>,
        auth_server: &str,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            device_id: device_id.into(),
            device_key: device_key.into(),
            auth_server: auth_server.trim_end_matches('/').to_owned(),
            session: Mutex::new(None),
        }
    }

    /// Returns the device id this client authenticates as.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns true if a handshake has succeeded and a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_session().is_some()
    }

    /// Returns the API endpoint resolved by the last handshake, if any.
    #[must_use]
    pub fn api_server(&self) -> Option<String> {
        self.lock_session()
            .as_ref()
            .map(|state| state.api_server.clone())
    }

    /// Performs the authentication handshake, replacing any prior session
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] when the server rejects the
    /// handshake; the client is left unauthenticated.
    pub fn authenticate(&self) -> Result<()> {
        let mut session = self.lock_session();
        self.handshake(&mut session).map(|_| ())
    }

    /// Issues an authenticated request for a device-relative path, with the
    /// one-shot reauthenticate-and-retry cycle on `403 Forbidden`.
    ///
    /// The response is returned whatever its status; interpreting the
    /// status code is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] if a handshake is needed and
    /// rejected, or [`Error::Transport`] if a request never produced a
    /// response.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        debug_assert!(path.starts_with('/'), "path must be device-relative");

        let state = self.ensure_authenticated()?;
        let response = self.send_once(method, path, options.clone(), &state)?;
        if response.status != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        // The token was rejected. Re-authenticate and retry exactly once;
        // whatever comes back the second time belongs to the caller.
        info!(%method, path, "token rejected, re-authenticating");
        let state = {
            let mut session = self.lock_session();
            self.handshake(&mut session)?
        };
        let response = self.send_once(method, path, options, &state)?;
        Ok(response)
    }

    /// Issues a GET request through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn get(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::Get, path, options)
    }

    /// Issues a PUT request through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn put(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::Put, path, options)
    }

    /// Issues a POST request through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn post(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::Post, path, options)
    }

    /// Issues a DELETE request through the pipeline.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub fn delete(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::Delete, path, options)
    }

    fn send_once(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
        state: &SessionState,
    ) -> Result<HttpResponse> {
        let url = format!(
            "{}/SensorCloud/devices/{}{}",
            state.api_server, self.device_id, path
        );
        let options = options.param(AUTH_TOKEN_PARAM, &state.token);

        let started = Instant::now();
        let response = self.transport.send(method, &url, options)?;
        debug!(
            %method,
            %url,
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request complete"
        );
        Ok(response)
    }

    /// Returns the current session state, running the handshake first if the
    /// client has never authenticated.
    fn ensure_authenticated(&self) -> Result<SessionState> {
        let mut session = self.lock_session();
        if let Some(state) = session.as_ref() {
            return Ok(state.clone());
        }
        self.handshake(&mut session)
    }

    /// Runs the handshake while holding the session lock, replacing the
    /// token/endpoint pair wholesale on success and leaving the client
    /// unauthenticated on failure.
    fn handshake(&self, session: &mut Option<SessionState>) -> Result<SessionState> {
        *session = None;

        let url = format!(
            "{}/SensorCloud/devices/{}/authenticate/",
            self.auth_server, self.device_id
        );
        let options = RequestOptions::new()
            .param("version", API_VERSION)
            .param("key", &self.device_key)
            .accept(XDR_CONTENT_TYPE);

        let response = self.transport.send(Method::Get, &url, options)?;
        if response.status != StatusCode::OK {
            return Err(Error::AuthenticationFailed {
                body: response.text(),
            });
        }

        let (token, host) = wire::decode_auth_response(&response.body)?;
        let scheme = if self.auth_server.starts_with("http://") {
            "http://"
        } else {
            "https://"
        };
        let state = SessionState {
            token,
            api_server: format!("{scheme}{host}"),
        };
        debug!(api_server = %state.api_server, "authenticated");

        *session = Some(state.clone());
        Ok(state)
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<SessionState>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("device_id", &self.device_id)
            .field("auth_server", &self.auth_server)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
