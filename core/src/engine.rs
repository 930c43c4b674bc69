//! The transport capability: one HTTP request/response cycle.
//!
//! # Design
//! [`Engine`] is the single seam between the domain-facing controller and the
//! I/O primitive actually performing the call. Concrete engines
//! ([`ReqwestEngine`](crate::reqwest_engine::ReqwestEngine),
//! [`UreqEngine`](crate::ureq_engine::UreqEngine)) differ only in how the
//! bytes move; they share the URL construction and response classification in
//! this module, which is what makes them observably interchangeable. The
//! controller holds an engine value and never inspects which one it got.
//!
//! Engines are stateless across calls apart from their immutable base URL and
//! client handle, so one instance is safe to share across any number of
//! concurrent calls. There is no cancellation or timeout: a call that never
//! receives a response never resolves.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::TransportError;
use crate::http::HttpMethod;

/// A transport implementation performing one HTTP request/response cycle
/// against a fixed base URL.
///
/// `path` must start with `/`; the full URL is the plain concatenation of the
/// base URL and `path`, with no slash normalization. `body` is attached as a
/// JSON request body only for methods that allow one. The decoded response is
/// `None` when the server sent no body (DELETE), `Some` JSON otherwise.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError>;
}

#[async_trait]
impl<E: Engine + ?Sized> Engine for &E {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError> {
        (**self).request(method, path, body).await
    }
}

#[async_trait]
impl<E: Engine + ?Sized> Engine for Box<E> {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError> {
        (**self).request(method, path, body).await
    }
}

#[async_trait]
impl<E: Engine + ?Sized> Engine for Arc<E> {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError> {
        (**self).request(method, path, body).await
    }
}

/// Build the full request URL. Plain concatenation: the caller supplies the
/// leading `/` on `path` and duplicate slashes are not collapsed.
pub fn full_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

/// Classify a raw HTTP outcome the way every engine must.
///
/// Statuses in [200, 300) succeed; an empty body decodes to `None`, anything
/// else must be valid JSON. Non-2xx statuses become [`TransportError::Status`]
/// and undecodable bodies become [`TransportError::Network`]. Custom engine
/// implementations should funnel their responses through here so callers see
/// one uniform classification.
pub fn decode_body(status: u16, body: &str) -> Result<Option<Value>, TransportError> {
    if !(200..300).contains(&status) {
        return Err(TransportError::Status {
            status,
            body: body.to_string(),
        });
    }
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| TransportError::Network(format!("response is not valid JSON: {e}")))
}

pub(crate) fn log_request(method: HttpMethod, url: &str, body: Option<&Value>) {
    match body {
        Some(body) => debug!(%method, url, %body, "sending request"),
        None => debug!(%method, url, "sending request"),
    }
}

pub(crate) fn log_response(method: HttpMethod, url: &str, decoded: Option<&Value>) {
    debug!(%method, url, response = ?decoded, "request succeeded");
}

pub(crate) fn log_error(method: HttpMethod, url: &str, err: &TransportError) {
    error!(%method, url, %err, "request failed");
}
