//! Client-side data-access layer for the remote task service.
//!
//! # Overview
//! Talks JSON over HTTP to a task-management service, hiding the choice of
//! I/O primitive behind one [`Engine`] capability trait. Two interchangeable
//! engines exist: [`ReqwestEngine`] (async-native) and [`UreqEngine`]
//! (blocking agent bridged onto the async interface). [`TaskController`]
//! exposes the five domain operations (list, get, create, update, delete)
//! on top of whichever engine it is constructed with.
//!
//! # Design
//! - Engines share URL construction and response classification
//!   ([`engine::decode_body`]), so identical inputs yield identical outcomes
//!   regardless of the underlying client.
//! - Failures are classified once, by the engine, into [`TransportError`]:
//!   a non-2xx status or a below-HTTP failure. The controller adds typed
//!   decoding but never reclassifies.
//! - The underlying HTTP client is injected at engine construction, so both
//!   engines are testable in isolation; the controller is testable against
//!   any substitute [`Engine`].
//! - No retries, no caching, no authentication, no timeouts; callers own
//!   sequencing and error reporting.

pub mod controller;
pub mod engine;
pub mod error;
pub mod http;
pub mod reqwest_engine;
pub mod types;
pub mod ureq_engine;

pub use controller::TaskController;
pub use engine::Engine;
pub use error::TransportError;
pub use http::HttpMethod;
pub use reqwest_engine::ReqwestEngine;
pub use types::{CreateTask, Task, UpdateTask};
pub use ureq_engine::UreqEngine;
