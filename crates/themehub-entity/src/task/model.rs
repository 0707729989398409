//! Upload task entity model.
//!
//! Task records are created by the batch publish orchestrator; execution
//! (browser automation) happens outside this system and reports back via
//! status transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of an upload task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting for an uploader to pick it up.
    Pending,
    /// Upload in progress.
    Uploading,
    /// Upload confirmed successful.
    Success,
    /// Upload failed.
    Failed,
    /// Canceled by the operator.
    Canceled,
}

/// A persisted upload task.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UploadTask {
    /// Unique task identifier.
    pub id: Uuid,
    /// Account the upload is performed as.
    pub account_id: Uuid,
    /// Library holding the video.
    pub library_id: Uuid,
    /// Theme the task was created for, when created through a theme.
    pub theme_id: Option<Uuid>,
    /// Full path of the video within the library at creation time.
    pub resource_path: String,
    /// Upload title.
    pub title: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Optional scheduled publish time.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Current status.
    pub status: TaskStatus,
    /// Whether the video should be archived after a confirmed success.
    pub auto_archive: bool,
    /// Failure detail when status is failed.
    pub error_message: Option<String>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UploadTask {
    /// Whether the task is in a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            TaskStatus::Success | TaskStatus::Failed | TaskStatus::Canceled
        )
    }
}
