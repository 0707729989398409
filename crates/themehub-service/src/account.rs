//! Social account service.

use tracing::info;
use uuid::Uuid;

use themehub_core::error::AppError;
use themehub_core::result::AppResult;
use themehub_database::repositories::AccountRepository;
use themehub_entity::account::{Account, CreateAccount};

/// Service for account registry operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: AccountRepository,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(accounts: AccountRepository) -> Self {
        Self { accounts }
    }

    /// Register an account.
    pub async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        if data.platform.trim().is_empty() {
            return Err(AppError::validation("Platform must not be empty"));
        }
        if data.username.trim().is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        let account = self.accounts.create(data).await?;
        info!(account_id = %account.id, platform = %account.platform, "Registered account");
        Ok(account)
    }

    /// List all accounts.
    pub async fn list(&self) -> AppResult<Vec<Account>> {
        self.accounts.find_all().await
    }

    /// Get an account, failing if it does not exist.
    pub async fn get(&self, id: Uuid) -> AppResult<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account not found: {id}")))
    }

    /// Delete an account.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.accounts.delete(id).await? {
            return Err(AppError::not_found(format!("Account not found: {id}")));
        }
        Ok(())
    }
}
