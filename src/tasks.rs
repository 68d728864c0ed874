use crate::error::ApiError;
use crate::server::AppState;
use crate::store::TaskRow;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

pub async fn list_tasks_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskRow>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

pub async fn create_task_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateTask>,
) -> Result<(StatusCode, Json<TaskRow>), ApiError> {
    let title = normalize_title(&payload.title)?;
    let task = state.store.create(title).await?;
    info!(task_id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdateTask>,
) -> Result<Json<TaskRow>, ApiError> {
    let title = payload.title.as_deref().map(normalize_title).transpose()?;
    let task = state
        .store
        .update(task_id, title, payload.done)
        .await?
        .ok_or(ApiError::TaskNotFound)?;
    Ok(Json(task))
}

pub async fn delete_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete(task_id).await? {
        return Err(ApiError::TaskNotFound);
    }
    info!(task_id, "task deleted");
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

fn normalize_title(raw: &str) -> Result<&str, ApiError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::TitleRequired);
    }
    Ok(title)
}
