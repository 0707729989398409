//! Account repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use themehub_core::error::{AppError, ErrorKind};
use themehub_core::result::AppResult;
use themehub_entity::account::{Account, AccountStatus, CreateAccount};

/// Repository for social account records.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account.
    pub async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            platform: data.platform.clone(),
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO accounts (id, platform, username, display_name, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(account.id)
        .bind(&account.platform)
        .bind(&account.username)
        .bind(&account.display_name)
        .bind(account.status)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create account", e))?;

        Ok(account)
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    /// List all accounts.
    pub async fn find_all(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY platform, username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    /// Delete an account.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete account", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
