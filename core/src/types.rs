//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. The wire format
//! is camelCase JSON (`isCompleted`, `isImportant`), so every type carries a
//! `rename_all` attribute. Optional fields are skipped entirely when absent
//! rather than serialized as `null`; the service applies partial updates by
//! key presence.

use serde::{Deserialize, Serialize};

/// A single task returned by the API.
///
/// `id` is assigned by the service and never set by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
}

/// Request payload for creating a new task. No `id`; the service assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
}

/// Request payload for updating an existing task. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
}
