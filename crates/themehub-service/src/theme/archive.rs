//! Archive engine.
//!
//! Moves videos between a resource root and its archive subfolder. Batches
//! are processed strictly sequentially: moves into the same archive folder
//! could race on folder creation or colliding target names if parallelized,
//! and folder-existence-then-create is not atomic against the backend.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use themehub_core::error::AppError;
use themehub_core::paths;
use themehub_core::result::AppResult;
use themehub_core::traits::store::ResourceStoreSource;
use themehub_entity::theme::ThemeDetail;
use themehub_entity::video::VideoEntry;

use super::resolver::VideoResolver;

/// Which way a batch moves videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveDirection {
    Archive,
    Unarchive,
}

/// Outcome of one requested path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    /// The requested path.
    pub path: String,
    /// Whether the move succeeded.
    pub success: bool,
    /// Failure detail when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MoveResult {
    fn ok(path: &str) -> Self {
        Self {
            path: path.to_string(),
            success: true,
            message: None,
        }
    }

    fn failed(path: &str, message: String) -> Self {
        Self {
            path: path.to_string(),
            success: false,
            message: Some(message),
        }
    }

    fn skipped(path: &str) -> Self {
        Self::failed(path, "not found or not eligible".to_string())
    }
}

/// Partial-success report for an archive or unarchive batch.
///
/// `total` counts requested paths; `succeeded` counts moves that completed;
/// every requested path appears exactly once in `results`, including paths
/// that matched no eligible video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<MoveResult>,
}

/// Performs physical archive and unarchive moves for a theme.
#[derive(Debug, Clone)]
pub struct ArchiveEngine {
    source: Arc<dyn ResourceStoreSource>,
    resolver: Arc<VideoResolver>,
}

impl ArchiveEngine {
    /// Create an engine over the given store source and resolver.
    pub fn new(source: Arc<dyn ResourceStoreSource>, resolver: Arc<VideoResolver>) -> Self {
        Self { source, resolver }
    }

    /// Move the requested unpublished videos into their archive subfolder.
    pub async fn archive(
        &self,
        detail: &ThemeDetail,
        requested: &[String],
    ) -> AppResult<MoveReport> {
        self.run(detail, requested, MoveDirection::Archive).await
    }

    /// Move the requested published videos one level up, out of the archive
    /// subfolder.
    pub async fn unarchive(
        &self,
        detail: &ThemeDetail,
        requested: &[String],
    ) -> AppResult<MoveReport> {
        self.run(detail, requested, MoveDirection::Unarchive).await
    }

    /// Archive a single video by path, used after a confirmed upload
    /// success. Fails when the path was not moved.
    pub async fn archive_one(&self, detail: &ThemeDetail, path: &str) -> AppResult<()> {
        let report = self.archive(detail, &[path.to_string()]).await?;
        if report.succeeded == 1 {
            return Ok(());
        }
        let message = report
            .results
            .first()
            .and_then(|r| r.message.clone())
            .unwrap_or_else(|| "archive failed".to_string());
        Err(AppError::storage(format!(
            "Failed to archive {path}: {message}"
        )))
    }

    async fn run(
        &self,
        detail: &ThemeDetail,
        requested: &[String],
        direction: MoveDirection,
    ) -> AppResult<MoveReport> {
        let inventory = self.resolver.resolve(detail).await?;
        let wants_published = direction == MoveDirection::Unarchive;

        let mut results = Vec::with_capacity(requested.len());
        let mut succeeded = 0;

        // One video at a time; an individual failure never aborts the batch.
        for path in requested {
            let video = inventory
                .iter()
                .find(|v| &v.full_path == path && v.is_published == wants_published);
            let Some(video) = video else {
                results.push(MoveResult::skipped(path));
                continue;
            };

            match self.move_one(detail, video, direction).await {
                Ok(target) => {
                    info!(
                        theme_id = %detail.theme.id,
                        from = %video.full_path,
                        to = %target,
                        "Moved video"
                    );
                    succeeded += 1;
                    results.push(MoveResult::ok(path));
                }
                Err(err) => {
                    warn!(
                        theme_id = %detail.theme.id,
                        path = %video.full_path,
                        error = %err,
                        "Video move failed"
                    );
                    results.push(MoveResult::failed(path, err.message.clone()));
                }
            }
        }

        Ok(MoveReport {
            total: requested.len(),
            succeeded,
            failed: requested.len() - succeeded,
            results,
        })
    }

    async fn move_one(
        &self,
        detail: &ThemeDetail,
        video: &VideoEntry,
        direction: MoveDirection,
    ) -> AppResult<String> {
        let store = self.source.store_for(video.library_id).await?;
        let target = match direction {
            MoveDirection::Archive => {
                let archive_dir =
                    paths::join(&video.library_path, &detail.theme.archive_folder_name);
                // create_folder is not idempotent on every backend, so probe
                // first.
                if store.get_info(&archive_dir).await.is_err() {
                    store.create_folder(&archive_dir).await?;
                }
                paths::join(&archive_dir, &video.name)
            }
            MoveDirection::Unarchive => {
                unarchive_target(video, &detail.theme.archive_folder_name)?
            }
        };

        store.move_entry(&video.full_path, &target).await?;
        Ok(target)
    }
}

/// Target path for unarchiving: one level up from wherever the video sits.
///
/// Guards that the video really is inside a folder named like the archive
/// folder, so an operator path that merely claims to be published fails with
/// a per-item error instead of moving a file somewhere surprising.
fn unarchive_target(video: &VideoEntry, archive_folder_name: &str) -> AppResult<String> {
    if paths::base_name(&video.library_path) != archive_folder_name {
        return Err(AppError::validation(format!(
            "{} is not inside the {archive_folder_name} folder",
            video.full_path
        )));
    }
    let target_dir = paths::parent(&video.library_path);
    Ok(paths::join(&target_dir, &video.name))
}
