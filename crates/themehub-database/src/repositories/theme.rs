//! Theme repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use themehub_core::error::{AppError, ErrorKind};
use themehub_core::result::AppResult;
use themehub_entity::theme::{ResourceRoot, Theme, ThemeDetail};

/// Repository for theme CRUD and relation management.
#[derive(Debug, Clone)]
pub struct ThemeRepository {
    pool: SqlitePool,
}

impl ThemeRepository {
    /// Create a new theme repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a theme. The archive folder name is resolved by the caller.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        archive_folder_name: &str,
    ) -> AppResult<Theme> {
        let now = Utc::now();
        let theme = Theme {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(String::from),
            archive_folder_name: archive_folder_name.to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO themes (id, name, description, archive_folder_name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(theme.id)
        .bind(&theme.name)
        .bind(&theme.description)
        .bind(&theme.archive_folder_name)
        .bind(theme.created_at)
        .bind(theme.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create theme", e))?;

        Ok(theme)
    }

    /// Find a theme by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Theme>> {
        sqlx::query_as::<_, Theme>("SELECT * FROM themes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find theme", e))
    }

    /// List all themes.
    pub async fn find_all(&self) -> AppResult<Vec<Theme>> {
        sqlx::query_as::<_, Theme>("SELECT * FROM themes ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list themes", e))
    }

    /// Update a theme's mutable fields.
    pub async fn update(&self, theme: &Theme) -> AppResult<()> {
        sqlx::query(
            "UPDATE themes SET name = ?, description = ?, archive_folder_name = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&theme.name)
        .bind(&theme.description)
        .bind(&theme.archive_folder_name)
        .bind(Utc::now())
        .bind(theme.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update theme", e))?;
        Ok(())
    }

    /// Delete a theme. Relations cascade; underlying files and accounts
    /// are untouched.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM themes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete theme", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Link an account to a theme.
    pub async fn add_account(&self, theme_id: Uuid, account_id: Uuid) -> AppResult<()> {
        sqlx::query("INSERT INTO theme_accounts (theme_id, account_id, created_at) VALUES (?, ?, ?)")
            .bind(theme_id)
            .bind(account_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                    AppError::conflict("Account is already linked to this theme")
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to link account", e)
                }
            })?;
        Ok(())
    }

    /// Unlink an account from a theme.
    pub async fn remove_account(&self, theme_id: Uuid, account_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM theme_accounts WHERE theme_id = ? AND account_id = ?")
                .bind(theme_id)
                .bind(account_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to unlink account", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// List linked account ids for a theme.
    pub async fn list_account_ids(&self, theme_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT account_id FROM theme_accounts WHERE theme_id = ? ORDER BY created_at ASC",
        )
        .bind(theme_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list linked accounts", e)
        })
    }

    /// Add a resource root at the end of the theme's declaration order.
    pub async fn add_resource_root(
        &self,
        theme_id: Uuid,
        library_id: Uuid,
        folder_path: &str,
    ) -> AppResult<ResourceRoot> {
        let position: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM theme_resource_roots WHERE theme_id = ?",
        )
        .bind(theme_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute root position", e)
        })?;

        let root = ResourceRoot {
            id: Uuid::new_v4(),
            theme_id,
            library_id,
            folder_path: folder_path.to_string(),
            position,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO theme_resource_roots (id, theme_id, library_id, folder_path, position, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(root.id)
        .bind(root.theme_id)
        .bind(root.library_id)
        .bind(&root.folder_path)
        .bind(root.position)
        .bind(root.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
                AppError::conflict("This folder is already a resource root of the theme")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to add resource root", e)
            }
        })?;

        Ok(root)
    }

    /// Remove a resource root by id.
    pub async fn remove_resource_root(&self, theme_id: Uuid, root_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM theme_resource_roots WHERE id = ? AND theme_id = ?")
            .bind(root_id)
            .bind(theme_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove resource root", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// List resource roots in declaration order.
    pub async fn list_resource_roots(&self, theme_id: Uuid) -> AppResult<Vec<ResourceRoot>> {
        sqlx::query_as::<_, ResourceRoot>(
            "SELECT * FROM theme_resource_roots WHERE theme_id = ? ORDER BY position ASC",
        )
        .bind(theme_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list resource roots", e)
        })
    }

    /// Load a theme together with its relations.
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<ThemeDetail>> {
        let Some(theme) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let linked_account_ids = self.list_account_ids(id).await?;
        let resource_roots = self.list_resource_roots(id).await?;
        Ok(Some(ThemeDetail {
            theme,
            linked_account_ids,
            resource_roots,
        }))
    }
}
