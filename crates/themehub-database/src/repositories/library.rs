//! Library repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use themehub_core::error::{AppError, ErrorKind};
use themehub_core::result::AppResult;
use themehub_entity::library::{CreateLibrary, Library, UpdateLibrary};

/// Repository for resource library records.
#[derive(Debug, Clone)]
pub struct LibraryRepository {
    pool: SqlitePool,
}

impl LibraryRepository {
    /// Create a new library repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new library.
    pub async fn create(&self, data: &CreateLibrary) -> AppResult<Library> {
        let now = Utc::now();
        let library = Library {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            provider: data.provider,
            config: data.config.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO libraries (id, name, description, provider, config, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(library.id)
        .bind(&library.name)
        .bind(&library.description)
        .bind(library.provider)
        .bind(&library.config)
        .bind(library.created_at)
        .bind(library.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create library", e))?;

        Ok(library)
    }

    /// Find a library by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Library>> {
        sqlx::query_as::<_, Library>("SELECT * FROM libraries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find library", e))
    }

    /// List all libraries.
    pub async fn find_all(&self) -> AppResult<Vec<Library>> {
        sqlx::query_as::<_, Library>("SELECT * FROM libraries ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list libraries", e))
    }

    /// Update a library's mutable fields.
    pub async fn update(&self, id: Uuid, data: &UpdateLibrary) -> AppResult<Option<Library>> {
        let Some(mut library) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(name) = &data.name {
            library.name = name.clone();
        }
        if let Some(description) = &data.description {
            library.description = Some(description.clone());
        }
        if let Some(config) = &data.config {
            library.config = config.clone();
        }
        library.updated_at = Utc::now();

        sqlx::query(
            "UPDATE libraries SET name = ?, description = ?, config = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&library.name)
        .bind(&library.description)
        .bind(&library.config)
        .bind(library.updated_at)
        .bind(library.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update library", e))?;

        Ok(Some(library))
    }

    /// Delete a library.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM libraries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete library", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
