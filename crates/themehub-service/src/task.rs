//! Upload task lifecycle service.
//!
//! Status transitions are reported by the external uploader. A confirmed
//! success on a task flagged `auto_archive` triggers the single-video
//! archive path; archival only ever happens after that signal, never
//! during the upload itself.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use themehub_core::error::AppError;
use themehub_core::result::AppResult;
use themehub_database::repositories::{TaskRepository, ThemeRepository};
use themehub_entity::task::{TaskStatus, UploadTask};

use crate::theme::ArchiveEngine;

/// Service for upload task queries and status reporting.
#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: TaskRepository,
    themes: ThemeRepository,
    engine: Arc<ArchiveEngine>,
}

impl TaskService {
    /// Create a new task service.
    pub fn new(tasks: TaskRepository, themes: ThemeRepository, engine: Arc<ArchiveEngine>) -> Self {
        Self {
            tasks,
            themes,
            engine,
        }
    }

    /// List tasks, newest first. A status filter returns the matching
    /// tasks as a queue, oldest first.
    pub async fn list(&self, status: Option<TaskStatus>, limit: i64) -> AppResult<Vec<UploadTask>> {
        match status {
            Some(status) => self.tasks.find_by_status(status).await,
            None => self.tasks.find_all(limit).await,
        }
    }

    /// Get a task, failing if it does not exist.
    pub async fn get(&self, id: Uuid) -> AppResult<UploadTask> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task not found: {id}")))
    }

    /// Record a status transition reported by the uploader.
    ///
    /// A transition to `Success` on an auto-archive task archives the video
    /// through its theme. An archival failure is logged but does not undo
    /// the status update; the upload did succeed.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        error_message: Option<String>,
    ) -> AppResult<UploadTask> {
        let task = self
            .tasks
            .update_status(id, status, error_message.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task not found: {id}")))?;

        if status == TaskStatus::Success && task.auto_archive {
            self.archive_after_success(&task).await;
        }

        Ok(task)
    }

    async fn archive_after_success(&self, task: &UploadTask) {
        let Some(theme_id) = task.theme_id else {
            return;
        };

        let detail = match self.themes.find_detail(theme_id).await {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                warn!(task_id = %task.id, theme_id = %theme_id, "Theme gone, skipping auto-archive");
                return;
            }
            Err(err) => {
                warn!(task_id = %task.id, error = %err, "Failed to load theme for auto-archive");
                return;
            }
        };

        match self.engine.archive_one(&detail, &task.resource_path).await {
            Ok(()) => {
                info!(task_id = %task.id, path = %task.resource_path, "Auto-archived video");
            }
            Err(err) => {
                warn!(
                    task_id = %task.id,
                    path = %task.resource_path,
                    error = %err,
                    "Auto-archive failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{write_file, StaticStoreSource};
    use crate::theme::VideoResolver;
    use sqlx::SqlitePool;
    use themehub_core::config::DatabaseConfig;
    use themehub_core::traits::sink::CreateUploadTask;
    use themehub_database::repositories::{AccountRepository, LibraryRepository};
    use themehub_entity::account::CreateAccount;
    use themehub_entity::library::{CreateLibrary, LibraryProvider};
    use themehub_storage::providers::local::LocalResourceStore;

    async fn test_pool() -> SqlitePool {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connect_timeout_seconds: 5,
        };
        let pool = themehub_database::connection::create_pool(&config).await.unwrap();
        themehub_database::migration::run_migrations(&pool).await.unwrap();
        pool
    }

    struct Fixture {
        service: TaskService,
        task: UploadTask,
    }

    async fn fixture(dir: &tempfile::TempDir, auto_archive: bool) -> Fixture {
        let pool = test_pool().await;
        write_file(dir, "videos/food/a.mp4");

        let account = AccountRepository::new(pool.clone())
            .create(&CreateAccount {
                platform: "douyin".to_string(),
                username: "chef".to_string(),
                display_name: None,
            })
            .await
            .unwrap();
        let library = LibraryRepository::new(pool.clone())
            .create(&CreateLibrary {
                name: "lib".to_string(),
                description: None,
                provider: LibraryProvider::Local,
                config: serde_json::json!({ "rootPath": dir.path().to_str().unwrap() }),
            })
            .await
            .unwrap();

        let themes = ThemeRepository::new(pool.clone());
        let theme = themes.create("Food", None, "published").await.unwrap();
        themes
            .add_resource_root(theme.id, library.id, "/videos/food")
            .await
            .unwrap();

        let store = LocalResourceStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let source: Arc<dyn themehub_core::traits::store::ResourceStoreSource> =
            Arc::new(StaticStoreSource::with(library.id, Arc::new(store)));
        let resolver = Arc::new(VideoResolver::new(source.clone()));
        let engine = Arc::new(ArchiveEngine::new(source, resolver));

        let tasks = TaskRepository::new(pool.clone());
        let task = tasks
            .create(&CreateUploadTask {
                account_id: account.id,
                library_id: library.id,
                theme_id: Some(theme.id),
                resource_path: "/videos/food/a.mp4".to_string(),
                title: "a".to_string(),
                tags: String::new(),
                scheduled_at: None,
                auto_archive,
            })
            .await
            .unwrap();

        Fixture {
            service: TaskService::new(tasks, themes, engine),
            task,
        }
    }

    #[tokio::test]
    async fn test_success_triggers_auto_archive() {
        let dir = tempfile::tempdir().unwrap();
        let fx = fixture(&dir, true).await;

        let task = fx
            .service
            .update_status(fx.task.id, TaskStatus::Success, None)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Success);
        assert!(task.is_finished());
        assert!(dir.path().join("videos/food/published/a.mp4").exists());
        assert!(!dir.path().join("videos/food/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_failure_does_not_archive() {
        let dir = tempfile::tempdir().unwrap();
        let fx = fixture(&dir, true).await;

        let task = fx
            .service
            .update_status(fx.task.id, TaskStatus::Failed, Some("login expired".to_string()))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
        assert_eq!(task.error_message.as_deref(), Some("login expired"));
        assert!(dir.path().join("videos/food/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_success_without_auto_archive_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let fx = fixture(&dir, false).await;

        fx.service
            .update_status(fx.task.id, TaskStatus::Success, None)
            .await
            .unwrap();
        assert!(dir.path().join("videos/food/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let dir = tempfile::tempdir().unwrap();
        let fx = fixture(&dir, false).await;

        let pending = fx.service.list(Some(TaskStatus::Pending), 100).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, fx.task.id);

        fx.service
            .update_status(fx.task.id, TaskStatus::Success, None)
            .await
            .unwrap();

        assert!(fx.service.list(Some(TaskStatus::Pending), 100).await.unwrap().is_empty());
        let done = fx.service.list(Some(TaskStatus::Success), 100).await.unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(fx.service.list(None, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_unknown_task() {
        let dir = tempfile::tempdir().unwrap();
        let fx = fixture(&dir, true).await;

        let err = fx
            .service
            .update_status(Uuid::new_v4(), TaskStatus::Success, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, themehub_core::error::ErrorKind::NotFound);
    }
}
