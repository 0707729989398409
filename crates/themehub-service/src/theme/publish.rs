//! Batch publish orchestrator.
//!
//! Pure fan-out: one upload task per account × matched video, created
//! through the task sink. Upload execution and post-success archival are
//! separate steps owned by the task lifecycle, so a crash mid-upload never
//! leaves archival state inconsistent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use themehub_core::error::AppError;
use themehub_core::paths;
use themehub_core::result::AppResult;
use themehub_core::traits::sink::{CreateUploadTask, UploadTaskSink};
use themehub_entity::theme::ThemeDetail;

use super::resolver::VideoResolver;

/// Parameters for one batch publish call.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Accounts to publish as.
    pub account_ids: Vec<Uuid>,
    /// Full paths of videos to publish. Both published and unpublished
    /// videos are eligible; republishing an archived video is allowed.
    pub video_paths: Vec<String>,
    /// Whether each task should archive its video after a confirmed
    /// upload success.
    pub auto_archive: bool,
    /// Upload title; defaults to the video file name without extension.
    pub title: Option<String>,
    /// Tags, joined comma-separated onto the task.
    pub tags: Vec<String>,
    /// Optional scheduled publish time.
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// One created task in a publish report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTask {
    pub task_id: Uuid,
    pub account_id: Uuid,
    pub video_name: String,
    pub video_path: String,
    pub library_id: Uuid,
    pub auto_archive: bool,
}

/// One account × video pair whose task could not be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedTask {
    pub account_id: Uuid,
    pub video_path: String,
    pub message: String,
}

/// Result of a batch publish fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReport {
    pub tasks: Vec<CreatedTask>,
    pub failures: Vec<FailedTask>,
    pub total_tasks: usize,
    pub failed_tasks: usize,
    pub account_count: usize,
    pub video_count: usize,
}

/// Fans out upload-task creation over accounts × videos.
#[derive(Debug, Clone)]
pub struct BatchPublisher {
    resolver: Arc<VideoResolver>,
    sink: Arc<dyn UploadTaskSink>,
}

impl BatchPublisher {
    /// Create a publisher over the given resolver and task sink.
    pub fn new(resolver: Arc<VideoResolver>, sink: Arc<dyn UploadTaskSink>) -> Self {
        Self { resolver, sink }
    }

    /// Create one upload task per account × matched video.
    ///
    /// Tasks are created sequentially; a sink failure for one pair is
    /// recorded in the report's `failures` and the remaining pairs still
    /// get their tasks.
    pub async fn batch_publish(
        &self,
        detail: &ThemeDetail,
        request: &PublishRequest,
    ) -> AppResult<PublishReport> {
        if request.account_ids.is_empty() {
            return Err(AppError::validation("No accounts selected"));
        }
        if request.video_paths.is_empty() {
            return Err(AppError::validation("No videos selected"));
        }

        let inventory = self.resolver.resolve(detail).await?;
        let matched: Vec<_> = inventory
            .iter()
            .filter(|v| request.video_paths.contains(&v.full_path))
            .collect();
        if matched.is_empty() {
            return Err(AppError::validation("No videos matched the requested paths"));
        }

        let tags = request.tags.join(",");
        let mut tasks = Vec::with_capacity(request.account_ids.len() * matched.len());
        let mut failures = Vec::new();

        for account_id in &request.account_ids {
            for video in &matched {
                let title = request
                    .title
                    .clone()
                    .unwrap_or_else(|| paths::file_stem(&video.name).to_string());
                let create = CreateUploadTask {
                    account_id: *account_id,
                    library_id: video.library_id,
                    theme_id: Some(detail.theme.id),
                    resource_path: video.full_path.clone(),
                    title,
                    tags: tags.clone(),
                    scheduled_at: request.scheduled_at,
                    auto_archive: request.auto_archive,
                };
                match self.sink.create_task(&create).await {
                    Ok(task_id) => tasks.push(CreatedTask {
                        task_id,
                        account_id: *account_id,
                        video_name: video.name.clone(),
                        video_path: video.full_path.clone(),
                        library_id: video.library_id,
                        auto_archive: request.auto_archive,
                    }),
                    Err(err) => {
                        warn!(
                            theme_id = %detail.theme.id,
                            account_id = %account_id,
                            video_path = %video.full_path,
                            error = %err,
                            "Failed to create upload task"
                        );
                        failures.push(FailedTask {
                            account_id: *account_id,
                            video_path: video.full_path.clone(),
                            message: err.message.clone(),
                        });
                    }
                }
            }
        }

        info!(
            theme_id = %detail.theme.id,
            total_tasks = tasks.len(),
            failed_tasks = failures.len(),
            account_count = request.account_ids.len(),
            video_count = matched.len(),
            "Batch publish fan-out complete"
        );

        Ok(PublishReport {
            total_tasks: tasks.len(),
            failed_tasks: failures.len(),
            account_count: request.account_ids.len(),
            video_count: matched.len(),
            tasks,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{local_source, theme_detail, write_file, RecordingSink, RejectingSink};
    use themehub_core::error::ErrorKind;

    fn request(account_ids: Vec<Uuid>, video_paths: Vec<String>) -> PublishRequest {
        PublishRequest {
            account_ids,
            video_paths,
            auto_archive: true,
            title: None,
            tags: Vec::new(),
            scheduled_at: None,
        }
    }

    #[tokio::test]
    async fn test_fan_out_accounts_times_videos() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "videos/food/a.mp4");

        let (library_id, source) = local_source(&dir).await;
        let detail = theme_detail(library_id, &["/videos/food"]);
        let sink = Arc::new(RecordingSink::default());
        let publisher = BatchPublisher::new(
            Arc::new(VideoResolver::new(source)),
            sink.clone(),
        );

        let accounts = vec![Uuid::new_v4(), Uuid::new_v4()];
        let report = publisher
            .batch_publish(
                &detail,
                &request(accounts.clone(), vec!["/videos/food/a.mp4".to_string()]),
            )
            .await
            .unwrap();

        assert_eq!(report.total_tasks, 2);
        assert_eq!(report.failed_tasks, 0);
        assert!(report.failures.is_empty());
        assert_eq!(report.account_count, 2);
        assert_eq!(report.video_count, 1);
        assert!(report.tasks.iter().all(|t| t.auto_archive));
        assert_eq!(report.tasks[0].account_id, accounts[0]);
        assert_eq!(report.tasks[1].account_id, accounts[1]);

        let created = sink.created();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].resource_path, "/videos/food/a.mp4");
        assert_eq!(created[0].title, "a");
        assert_eq!(created[0].theme_id, Some(detail.theme.id));
        assert!(created[0].auto_archive);
    }

    #[tokio::test]
    async fn test_published_videos_are_eligible() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "videos/food/published/c.mp4");

        let (library_id, source) = local_source(&dir).await;
        let detail = theme_detail(library_id, &["/videos/food"]);
        let sink = Arc::new(RecordingSink::default());
        let publisher = BatchPublisher::new(
            Arc::new(VideoResolver::new(source)),
            sink.clone(),
        );

        let report = publisher
            .batch_publish(
                &detail,
                &request(
                    vec![Uuid::new_v4()],
                    vec!["/videos/food/published/c.mp4".to_string()],
                ),
            )
            .await
            .unwrap();

        assert_eq!(report.total_tasks, 1);
        assert_eq!(sink.created()[0].resource_path, "/videos/food/published/c.mp4");
    }

    #[tokio::test]
    async fn test_title_and_tags_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "videos/food/a.mp4");

        let (library_id, source) = local_source(&dir).await;
        let detail = theme_detail(library_id, &["/videos/food"]);
        let sink = Arc::new(RecordingSink::default());
        let publisher = BatchPublisher::new(
            Arc::new(VideoResolver::new(source)),
            sink.clone(),
        );

        let mut req = request(vec![Uuid::new_v4()], vec!["/videos/food/a.mp4".to_string()]);
        req.title = Some("My clip".to_string());
        req.tags = vec!["food".to_string(), "travel".to_string()];

        publisher.batch_publish(&detail, &req).await.unwrap();

        let created = sink.created();
        assert_eq!(created[0].title, "My clip");
        assert_eq!(created[0].tags, "food,travel");
    }

    #[tokio::test]
    async fn test_sink_failures_appear_in_report() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "videos/food/a.mp4");

        let (library_id, source) = local_source(&dir).await;
        let detail = theme_detail(library_id, &["/videos/food"]);
        let bad_account = Uuid::new_v4();
        let good_account = Uuid::new_v4();
        let sink = Arc::new(RejectingSink::new(bad_account));
        let publisher = BatchPublisher::new(
            Arc::new(VideoResolver::new(source)),
            sink.clone(),
        );

        let report = publisher
            .batch_publish(
                &detail,
                &request(
                    vec![bad_account, good_account],
                    vec!["/videos/food/a.mp4".to_string()],
                ),
            )
            .await
            .unwrap();

        assert_eq!(report.total_tasks, 1);
        assert_eq!(report.failed_tasks, 1);
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].account_id, good_account);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].account_id, bad_account);
        assert_eq!(report.failures[0].video_path, "/videos/food/a.mp4");
        assert!(!report.failures[0].message.is_empty());
        assert_eq!(sink.created().len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_empty_accounts_and_videos() {
        let dir = tempfile::tempdir().unwrap();
        let (library_id, source) = local_source(&dir).await;
        let detail = theme_detail(library_id, &["/videos/food"]);
        let publisher = BatchPublisher::new(
            Arc::new(VideoResolver::new(source)),
            Arc::new(RecordingSink::default()),
        );

        let err = publisher
            .batch_publish(&detail, &request(vec![], vec!["/a.mp4".to_string()]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = publisher
            .batch_publish(&detail, &request(vec![Uuid::new_v4()], vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_rejects_unmatched_paths() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir, "videos/food/a.mp4");

        let (library_id, source) = local_source(&dir).await;
        let detail = theme_detail(library_id, &["/videos/food"]);
        let publisher = BatchPublisher::new(
            Arc::new(VideoResolver::new(source)),
            Arc::new(RecordingSink::default()),
        );

        let err = publisher
            .batch_publish(
                &detail,
                &request(vec![Uuid::new_v4()], vec!["/videos/food/missing.mp4".to_string()]),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("matched"));
    }
}
