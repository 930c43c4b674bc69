//! Domain-facing facade mapping task operations onto engine calls.
//!
//! # Design
//! `TaskController` owns exactly one [`Engine`], chosen at construction and
//! never switched. Each operation is a fixed (method, path, body) mapping:
//! no retries, no validation, no business logic. Engine failures propagate
//! unchanged so callers see the engine's own classification; the only work
//! added here is converting the decoded JSON into domain types, which keeps
//! the engine trait object-safe.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::engine::Engine;
use crate::error::TransportError;
use crate::http::HttpMethod;
use crate::types::{CreateTask, Task, UpdateTask};

/// Task operations over an injected engine.
///
/// The engine is any [`Engine`] value: a concrete engine, a `Box<dyn
/// Engine>` chosen at runtime, or an `Arc` shared with other controllers.
/// Construction requires the engine by value, so a controller without one
/// cannot exist.
#[derive(Debug, Clone)]
pub struct TaskController<E> {
    engine: E,
}

impl<E: Engine> TaskController<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, TransportError> {
        let body = self.engine.request(HttpMethod::Get, "/tasks", None).await?;
        decoded(body)
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, TransportError> {
        let body = self
            .engine
            .request(HttpMethod::Get, &format!("/tasks/{id}"), None)
            .await?;
        decoded(body)
    }

    pub async fn create_task(&self, input: &CreateTask) -> Result<Task, TransportError> {
        let payload = payload(input)?;
        let body = self
            .engine
            .request(HttpMethod::Post, "/tasks", Some(&payload))
            .await?;
        decoded(body)
    }

    pub async fn update_task(&self, id: i64, input: &UpdateTask) -> Result<Task, TransportError> {
        let payload = payload(input)?;
        let body = self
            .engine
            .request(HttpMethod::Patch, &format!("/tasks/{id}"), Some(&payload))
            .await?;
        decoded(body)
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), TransportError> {
        self.engine
            .request(HttpMethod::Delete, &format!("/tasks/{id}"), None)
            .await?;
        Ok(())
    }
}

fn payload<T: Serialize>(input: &T) -> Result<Value, TransportError> {
    serde_json::to_value(input)
        .map_err(|e| TransportError::Network(format!("payload is not serializable: {e}")))
}

fn decoded<T: DeserializeOwned>(body: Option<Value>) -> Result<T, TransportError> {
    let value = body.ok_or_else(|| TransportError::Network("response body is empty".to_string()))?;
    serde_json::from_value(value)
        .map_err(|e| TransportError::Network(format!("unexpected response shape: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    /// Substitute engine: records every call and replays canned outcomes.
    struct ScriptedEngine {
        calls: Mutex<Vec<(HttpMethod, String, Option<Value>)>>,
        replies: Mutex<VecDeque<Result<Option<Value>, TransportError>>>,
    }

    impl ScriptedEngine {
        fn replying(replies: Vec<Result<Option<Value>, TransportError>>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            }
        }

        fn calls(&self) -> Vec<(HttpMethod, String, Option<Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Engine for ScriptedEngine {
        async fn request(
            &self,
            method: HttpMethod,
            path: &str,
            body: Option<&Value>,
        ) -> Result<Option<Value>, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), body.cloned()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn task_json(id: i64, name: &str) -> Value {
        json!({"id": id, "name": name})
    }

    #[tokio::test]
    async fn list_tasks_maps_to_get_tasks() {
        let engine = ScriptedEngine::replying(vec![Ok(Some(json!([task_json(1, "A")])))]);
        let controller = TaskController::new(&engine);

        let tasks = controller.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "A");
        assert_eq!(
            engine.calls(),
            vec![(HttpMethod::Get, "/tasks".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn get_task_maps_to_get_tasks_id() {
        let engine = ScriptedEngine::replying(vec![Ok(Some(task_json(7, "Seventh")))]);
        let controller = TaskController::new(&engine);

        let task = controller.get_task(7).await.unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(
            engine.calls(),
            vec![(HttpMethod::Get, "/tasks/7".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn create_task_posts_wire_shaped_body() {
        let engine = ScriptedEngine::replying(vec![Ok(Some(task_json(1, "Buy milk")))]);
        let controller = TaskController::new(&engine);

        let input = CreateTask {
            name: "Buy milk".to_string(),
            info: Some("2 liters".to_string()),
            is_completed: None,
            is_important: Some(true),
        };
        let created = controller.create_task(&input).await.unwrap();
        assert_eq!(created.id, 1);

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        let (method, path, body) = &calls[0];
        assert_eq!(*method, HttpMethod::Post);
        assert_eq!(path, "/tasks");
        assert_eq!(
            body.as_ref().unwrap(),
            &json!({"name": "Buy milk", "info": "2 liters", "isImportant": true})
        );
    }

    #[tokio::test]
    async fn update_task_patches_only_provided_fields() {
        let engine = ScriptedEngine::replying(vec![Ok(Some(task_json(3, "Unchanged")))]);
        let controller = TaskController::new(&engine);

        let input = UpdateTask {
            is_completed: Some(true),
            ..UpdateTask::default()
        };
        controller.update_task(3, &input).await.unwrap();

        let calls = engine.calls();
        let (method, path, body) = &calls[0];
        assert_eq!(*method, HttpMethod::Patch);
        assert_eq!(path, "/tasks/3");
        assert_eq!(body.as_ref().unwrap(), &json!({"isCompleted": true}));
    }

    #[tokio::test]
    async fn delete_task_maps_to_delete_and_returns_unit() {
        let engine = ScriptedEngine::replying(vec![Ok(None)]);
        let controller = TaskController::new(&engine);

        controller.delete_task(9).await.unwrap();
        assert_eq!(
            engine.calls(),
            vec![(HttpMethod::Delete, "/tasks/9".to_string(), None)]
        );
    }

    #[tokio::test]
    async fn status_failures_propagate_unchanged() {
        let engine = ScriptedEngine::replying(vec![Err(TransportError::Status {
            status: 500,
            body: "internal error".to_string(),
        })]);
        let controller = TaskController::new(&engine);

        let err = controller.list_tasks().await.unwrap_err();
        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn network_failures_propagate_unchanged() {
        let engine = ScriptedEngine::replying(vec![Err(TransportError::Network(
            "connection refused".to_string(),
        ))]);
        let controller = TaskController::new(&engine);

        let err = controller.delete_task(1).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn missing_body_where_a_task_is_expected_is_a_decode_failure() {
        let engine = ScriptedEngine::replying(vec![Ok(None)]);
        let controller = TaskController::new(&engine);

        let err = controller.get_task(1).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn mis_shaped_body_is_a_decode_failure() {
        let engine = ScriptedEngine::replying(vec![Ok(Some(json!({"unexpected": "shape"})))]);
        let controller = TaskController::new(&engine);

        let err = controller.get_task(1).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
