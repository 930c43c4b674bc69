use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
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

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub is_important: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub name: Option<String>,
    pub info: Option<String>,
    pub is_completed: Option<bool>,
    pub is_important: Option<bool>,
}

/// Shared server state: the task table plus the id counter the service
/// assigns from, monotonically, starting at 1.
#[derive(Default)]
pub struct Store {
    tasks: RwLock<HashMap<i64, Task>>,
    next_id: AtomicI64,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    let db: Db = Arc::new(Store::default());
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let tasks = db.tasks.read().await;
    Json(tasks.values().cloned().collect())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> (StatusCode, Json<Task>) {
    let id = db.next_id.fetch_add(1, Ordering::Relaxed) + 1;
    let task = Task {
        id,
        name: input.name,
        info: input.info,
        is_completed: input.is_completed,
        is_important: input.is_important,
    };
    db.tasks.write().await.insert(task.id, task.clone());
    (StatusCode::CREATED, Json(task))
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Task>, StatusCode> {
    let tasks = db.tasks.read().await;
    tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = db.tasks.write().await;
    let task = tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        task.name = name;
    }
    if let Some(info) = input.info {
        task.info = Some(info);
    }
    if let Some(is_completed) = input.is_completed {
        task.is_completed = Some(is_completed);
    }
    if let Some(is_important) = input.is_important {
        task.is_important = Some(is_important);
    }
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut tasks = db.tasks.write().await;
    tasks
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
