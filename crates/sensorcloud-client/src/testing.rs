//! Scripted transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use bytes::Bytes;
use reqwest::StatusCode;

use sensorcloud_xdr::XdrWriter;

use crate::transport::{HttpResponse, Method, RequestOptions, Transport, TransportError};

/// One request as seen by the mock transport.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<Bytes>,
}

impl RecordedCall {
    pub(crate) fn has_param(&self, name: &str, value: &str) -> bool {
        self.query_params
            .iter()
            .any(|(n, v)| n == name && v == value)
    }

    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A [`Transport`] that pops one scripted response per request and records
/// every request it sees.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub(crate) fn scripted(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_owned(),
            query_params: options.query_params().to_vec(),
            body: options.body_bytes().cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Connection("no scripted response left".to_owned()))
    }
}

/// Builds a response with the given status and raw body.
pub(crate) fn response(status: StatusCode, body: &[u8]) -> HttpResponse {
    HttpResponse {
        status,
        content_type: None,
        body: Bytes::copy_from_slice(body),
    }
}

/// Builds a successful authentication handshake response.
pub(crate) fn auth_response(token: &str, host: &str) -> HttpResponse {
    let mut writer = XdrWriter::new();
    writer.write_string(token);
    writer.write_string(host);
    HttpResponse {
        status: StatusCode::OK,
        content_type: Some(crate::client::XDR_CONTENT_TYPE.to_owned()),
        body: Bytes::from(writer.into_bytes()),
    }
}

/// Builds an XDR point-stream body for a download chunk.
pub(crate) fn chunk_body(points: &[(u64, f32)]) -> Vec<u8> {
    let mut writer = XdrWriter::new();
    for (timestamp, value) in points {
        writer.write_uint64(*timestamp);
        writer.write_float32(*value);
    }
    writer.into_bytes()
}
