//! Upload task repository implementation.
//!
//! Also implements [`UploadTaskSink`], making the repository the concrete
//! Task Sink the publish orchestrator fans out into.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use themehub_core::error::{AppError, ErrorKind};
use themehub_core::result::AppResult;
use themehub_core::traits::sink::{CreateUploadTask, UploadTaskSink};
use themehub_entity::task::{TaskStatus, UploadTask};

/// Repository for upload task records.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a pending upload task.
    pub async fn create(&self, data: &CreateUploadTask) -> AppResult<UploadTask> {
        let now = Utc::now();
        let task = UploadTask {
            id: Uuid::new_v4(),
            account_id: data.account_id,
            library_id: data.library_id,
            theme_id: data.theme_id,
            resource_path: data.resource_path.clone(),
            title: data.title.clone(),
            tags: data.tags.clone(),
            scheduled_at: data.scheduled_at,
            status: TaskStatus::Pending,
            auto_archive: data.auto_archive,
            error_message: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO upload_tasks \
             (id, account_id, library_id, theme_id, resource_path, title, tags, scheduled_at, status, auto_archive, error_message, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(task.id)
        .bind(task.account_id)
        .bind(task.library_id)
        .bind(task.theme_id)
        .bind(&task.resource_path)
        .bind(&task.title)
        .bind(&task.tags)
        .bind(task.scheduled_at)
        .bind(task.status)
        .bind(task.auto_archive)
        .bind(&task.error_message)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))?;

        Ok(task)
    }

    /// Find a task by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UploadTask>> {
        sqlx::query_as::<_, UploadTask>("SELECT * FROM upload_tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    /// List tasks, newest first.
    pub async fn find_all(&self, limit: i64) -> AppResult<Vec<UploadTask>> {
        sqlx::query_as::<_, UploadTask>(
            "SELECT * FROM upload_tasks ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    /// List tasks with a given status, oldest first.
    pub async fn find_by_status(&self, status: TaskStatus) -> AppResult<Vec<UploadTask>> {
        sqlx::query_as::<_, UploadTask>(
            "SELECT * FROM upload_tasks WHERE status = ? ORDER BY created_at ASC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    /// Transition a task's status and return the updated record.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        error_message: Option<&str>,
    ) -> AppResult<Option<UploadTask>> {
        let result = sqlx::query(
            "UPDATE upload_tasks SET status = ?, error_message = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status)
        .bind(error_message)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update task status", e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

#[async_trait]
impl UploadTaskSink for TaskRepository {
    async fn create_task(&self, task: &CreateUploadTask) -> AppResult<Uuid> {
        Ok(self.create(task).await?.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themehub_core::config::DatabaseConfig;

    async fn test_pool() -> SqlitePool {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connect_timeout_seconds: 5,
        };
        let pool = crate::connection::create_pool(&config).await.unwrap();
        crate::migration::run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_refs(pool: &SqlitePool) -> (Uuid, Uuid) {
        let account_id = Uuid::new_v4();
        let library_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO accounts (id, platform, username, status, created_at, updated_at) \
             VALUES (?, 'douyin', 'foodie', 'active', ?, ?)",
        )
        .bind(account_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO libraries (id, name, provider, config, created_at, updated_at) \
             VALUES (?, 'lib', 'local', '{}', ?, ?)",
        )
        .bind(library_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap();
        (account_id, library_id)
    }

    #[tokio::test]
    async fn test_create_and_transition() {
        let pool = test_pool().await;
        let repo = TaskRepository::new(pool.clone());
        let (account_id, library_id) = seed_refs(&pool).await;

        let created = repo
            .create(&CreateUploadTask {
                account_id,
                library_id,
                theme_id: None,
                resource_path: "/videos/food/a.mp4".to_string(),
                title: "a".to_string(),
                tags: "food,street".to_string(),
                scheduled_at: None,
                auto_archive: true,
            })
            .await
            .unwrap();
        assert_eq!(created.status, TaskStatus::Pending);
        assert!(created.auto_archive);

        let updated = repo
            .update_status(created.id, TaskStatus::Success, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Success);
        assert!(updated.is_finished());
    }
}
