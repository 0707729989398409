//! Upload task sink trait.
//!
//! The publish orchestrator only creates task records; upload execution is
//! owned by an external system. The sink is opaque beyond returning the
//! created task's identifier.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Data required to create one upload task.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUploadTask {
    /// Account the upload is performed as.
    pub account_id: Uuid,
    /// Library holding the video.
    pub library_id: Uuid,
    /// Theme the task was created for, when created through a theme.
    pub theme_id: Option<Uuid>,
    /// Full path of the video within the library.
    pub resource_path: String,
    /// Upload title.
    pub title: String,
    /// Comma-separated tags.
    pub tags: String,
    /// Optional scheduled publish time.
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Whether the video should be archived after a confirmed upload success.
    pub auto_archive: bool,
}

/// Trait for the external system of record for upload tasks.
#[async_trait]
pub trait UploadTaskSink: Send + Sync + std::fmt::Debug {
    /// Create an upload task record and return its identifier.
    async fn create_task(&self, task: &CreateUploadTask) -> AppResult<Uuid>;
}
