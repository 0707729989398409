//! Theme handlers: registry CRUD, relations, and the video pipeline
//! endpoints (inventory, statistics, archive, unarchive, batch publish).

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use themehub_entity::theme::{CreateTheme, ResourceRoot, Theme, ThemeDetail, UpdateTheme};
use themehub_entity::video::VideoEntry;
use themehub_service::theme::{
    CreatedTask, FailedTask, MoveReport, MoveResult, PublishRequest, PublishStats,
};

use crate::error::{ok, ApiResult};
use crate::state::AppState;

/// GET /api/themes
pub async fn list_themes(State(state): State<AppState>) -> ApiResult<Vec<Theme>> {
    let themes = state.themes.list().await?;
    ok(themes)
}

/// POST /api/themes
pub async fn create_theme(
    State(state): State<AppState>,
    Json(body): Json<CreateTheme>,
) -> ApiResult<Theme> {
    let theme = state.themes.create(&body).await?;
    ok(theme)
}

/// GET /api/themes/{id}
pub async fn get_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ThemeDetail> {
    let detail = state.themes.detail(id).await?;
    ok(detail)
}

/// PUT /api/themes/{id}
pub async fn update_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTheme>,
) -> ApiResult<Theme> {
    let theme = state.themes.update(id, &body).await?;
    ok(theme)
}

/// DELETE /api/themes/{id}
pub async fn delete_theme(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.themes.delete(id).await?;
    ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountRequest {
    pub account_id: Uuid,
}

/// POST /api/themes/{id}/accounts
pub async fn link_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<LinkAccountRequest>,
) -> ApiResult<()> {
    state.themes.link_account(id, body.account_id).await?;
    ok(())
}

/// DELETE /api/themes/{id}/accounts/{accountId}
pub async fn unlink_account(
    State(state): State<AppState>,
    Path((id, account_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<()> {
    state.themes.unlink_account(id, account_id).await?;
    ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResourceRootRequest {
    pub library_id: Uuid,
    pub folder_path: String,
}

/// POST /api/themes/{id}/resource-roots
pub async fn add_resource_root(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddResourceRootRequest>,
) -> ApiResult<ResourceRoot> {
    let root = state
        .themes
        .add_resource_root(id, body.library_id, &body.folder_path)
        .await?;
    ok(root)
}

/// DELETE /api/themes/{id}/resource-roots/{rootId}
pub async fn remove_resource_root(
    State(state): State<AppState>,
    Path((id, root_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<()> {
    state.themes.remove_resource_root(id, root_id).await?;
    ok(())
}

/// GET /api/themes/{id}/videos
pub async fn list_videos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<VideoEntry>> {
    let detail = state.themes.detail(id).await?;
    let videos = state.resolver.resolve(&detail).await?;
    ok(videos)
}

/// GET /api/themes/{id}/statistics
pub async fn statistics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PublishStats> {
    let detail = state.themes.detail(id).await?;
    let stats = state.statistics.statistics(&detail).await?;
    ok(stats)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPathsRequest {
    pub video_paths: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveResponse {
    pub total: usize,
    pub archived: usize,
    pub failed: usize,
    pub results: Vec<MoveResult>,
}

impl From<MoveReport> for ArchiveResponse {
    fn from(report: MoveReport) -> Self {
        Self {
            total: report.total,
            archived: report.succeeded,
            failed: report.failed,
            results: report.results,
        }
    }
}

/// POST /api/themes/{id}/videos/archive
///
/// Always returns 200 with an embedded `failed` count; callers inspect
/// the per-item results to determine the true outcome.
pub async fn archive_videos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VideoPathsRequest>,
) -> ApiResult<ArchiveResponse> {
    let detail = state.themes.detail(id).await?;
    let report = state.archive.archive(&detail, &body.video_paths).await?;
    ok(report.into())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnarchiveResponse {
    pub total: usize,
    pub unarchived: usize,
    pub failed: usize,
    pub results: Vec<MoveResult>,
}

impl From<MoveReport> for UnarchiveResponse {
    fn from(report: MoveReport) -> Self {
        Self {
            total: report.total,
            unarchived: report.succeeded,
            failed: report.failed,
            results: report.results,
        }
    }
}

/// POST /api/themes/{id}/videos/unarchive
pub async fn unarchive_videos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VideoPathsRequest>,
) -> ApiResult<UnarchiveResponse> {
    let detail = state.themes.detail(id).await?;
    let report = state.archive.unarchive(&detail, &body.video_paths).await?;
    ok(report.into())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPublishRequest {
    pub account_ids: Vec<Uuid>,
    pub video_paths: Vec<String>,
    #[serde(default = "default_auto_archive")]
    pub auto_archive: bool,
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_auto_archive() -> bool {
    true
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPublishResponse {
    pub tasks: Vec<CreatedTask>,
    pub failures: Vec<FailedTask>,
    pub total_tasks: usize,
    pub failed_tasks: usize,
    pub account_count: usize,
    pub video_count: usize,
}

/// POST /api/themes/{id}/batch-publish
pub async fn batch_publish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<BatchPublishRequest>,
) -> ApiResult<BatchPublishResponse> {
    let detail = state.themes.detail(id).await?;
    let request = PublishRequest {
        account_ids: body.account_ids,
        video_paths: body.video_paths,
        auto_archive: body.auto_archive,
        title: body.title,
        tags: body.tags,
        scheduled_at: body.scheduled_at,
    };
    let report = state.publisher.batch_publish(&detail, &request).await?;
    ok(BatchPublishResponse {
        tasks: report.tasks,
        failures: report.failures,
        total_tasks: report.total_tasks,
        failed_tasks: report.failed_tasks,
        account_count: report.account_count,
        video_count: report.video_count,
    })
}
