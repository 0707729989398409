//! Upload task handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use themehub_entity::task::{TaskStatus, UploadTask};

use crate::error::{ok, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    pub status: Option<TaskStatus>,
    pub limit: Option<i64>,
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Vec<UploadTask>> {
    let tasks = state
        .tasks
        .list(query.status, query.limit.unwrap_or(100))
        .await?;
    ok(tasks)
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<UploadTask> {
    let task = state.tasks.get(id).await?;
    ok(task)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: TaskStatus,
    pub error_message: Option<String>,
}

/// PUT /api/tasks/{id}/status
///
/// Reported by the external uploader. A success on an auto-archive task
/// archives the video through its theme.
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<UploadTask> {
    let task = state
        .tasks
        .update_status(id, body.status, body.error_message)
        .await?;
    ok(task)
}
