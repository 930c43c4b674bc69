//! Async-native engine built on `reqwest::Client`.

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::{decode_body, full_url, log_error, log_request, log_response, Engine};
use crate::error::TransportError;
use crate::http::HttpMethod;

/// [`Engine`] backed by a shared `reqwest::Client`.
///
/// The client is injected at construction so tests can supply one with their
/// own settings; `new` builds a default client. Cloning is cheap; the
/// underlying client is reference-counted.
#[derive(Debug, Clone)]
pub struct ReqwestEngine {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Engine for ReqwestEngine {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, TransportError> {
        let url = full_url(&self.base_url, path);
        log_request(method, &url, body);

        let mut builder = self
            .client
            .request(to_method(method), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            if method.allows_body() {
                builder = builder.json(body);
            }
        }

        let outcome = async {
            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            decode_body(status, &text)
        }
        .await;

        match &outcome {
            Ok(decoded) => log_response(method, &url, decoded.as_ref()),
            Err(err) => log_error(method, &url, err),
        }
        outcome
    }
}
