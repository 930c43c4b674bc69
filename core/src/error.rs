//! Error types for the task API client.
//!
//! # Design
//! Two kinds of failure, classified by the engine: the server answered with a
//! non-2xx status (`Status`), or the request never produced a usable response
//! (`Network`: connection failure, or a 2xx body that was not valid JSON).
//! Callers that care about "does not exist" check `is_not_found()` rather
//! than a dedicated variant, so the classification stays two-kinded.

use std::fmt;

/// Unified failure type raised by an [`Engine`](crate::engine::Engine).
///
/// The controller propagates these unchanged, so the classification a caller
/// observes is exactly the one the engine made.
#[derive(Debug)]
pub enum TransportError {
    /// The server returned a status outside [200, 300). Carries the raw
    /// response body for debugging.
    Status { status: u16, body: String },

    /// The request failed below the HTTP layer (connection refused, timeout,
    /// DNS), or a successful response carried a body that was not valid JSON.
    Network(String),
}

impl TransportError {
    /// The HTTP status code, if the server got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status { status, body } if body.is_empty() => {
                write!(f, "HTTP {status}")
            }
            TransportError::Status { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            TransportError::Network(msg) => {
                write!(f, "network error: {msg}")
            }
        }
    }
}

impl std::error::Error for TransportError {}
