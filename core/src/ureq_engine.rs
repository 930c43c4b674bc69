//! Engine built on the synchronous `ureq::Agent`.
//!
//! # Design
//! `ureq` performs blocking I/O, so each call is moved onto the tokio
//! blocking pool with `spawn_blocking` and the result surfaced through the
//! same async [`Engine`] interface as the reqwest implementation. The agent
//! is configured with `http_status_as_error(false)` so non-2xx responses come
//! back as data and classification stays in [`decode_body`], identical to the
//! other engine.

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{decode_body, full_url, log_error, log_request, log_response, Engine};
use crate::error::TransportError;
use crate::http::HttpMethod;

/// [`Engine`] backed by a blocking `ureq::Agent`, bridged onto the async
/// interface via the tokio blocking pool. Calls must run inside a tokio
/// runtime.
#[derive(Debug, Clone)]
pub struct UreqEngine {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqEngine {
    /// Build an engine with an agent that reports every status as data.
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent, base_url)
    }

    /// Use a caller-supplied agent. The agent must be configured with
    /// `http_status_as_error(false)`, otherwise non-2xx responses surface as
    /// transport failures instead of status failures.
    pub fn with_agent(agent: ureq::Agent, base_url: impl Into<String>) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// One blocking round-trip: returns the raw status and body text.
fn round_trip(
    agent: &ureq::Agent,
    method: HttpMethod,
    url: &str,
    payload: Option<&str>,
) -> Result<(u16, String), TransportError> {
    let result = match (method, payload) {
        (HttpMethod::Get, _) => agent
            .get(url)
            .header("Content-Type", "application/json")
            .call(),
        (HttpMethod::Delete, _) => agent
            .delete(url)
            .header("Content-Type", "application/json")
            .call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, Some(body)) => agent
            .put(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent
            .post(url)
            .content_type("application/json")
            .send_empty(),
        (HttpMethod::Put, None) => agent
            .put(url)
            .content_type("application/json")
            .send_empty(),
        (HttpMethod::Patch, None) => agent
            .patch(url)
            .content_type("application/json")
            .send_empty(),
    };

    let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::Network(e.to_string()))?;
    Ok((status, body))
}

#[async_trait]
impl Engine for UreqEngine {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError> {
        let url = full_url(&self.base_url, path);
        log_request(method, &url, body);

        let agent = self.agent.clone();
        let task_url = url.clone();
        let payload = match body {
            Some(body) if method.allows_body() => Some(body.to_string()),
            _ => None,
        };

        let outcome = match tokio::task::spawn_blocking(move || {
            round_trip(&agent, method, &task_url, payload.as_deref())
        })
        .await
        {
            Ok(Ok((status, text))) => decode_body(status, &text),
            Ok(Err(err)) => Err(err),
            Err(join_err) => Err(TransportError::Network(format!(
                "blocking task failed: {join_err}"
            ))),
        };

        match &outcome {
            Ok(decoded) => log_response(method, &url, decoded.as_ref()),
            Err(err) => log_error(method, &url, err),
        }
        outcome
    }
}
