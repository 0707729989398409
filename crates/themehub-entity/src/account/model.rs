//! Social account entity model.
//!
//! Accounts are thin records referenced by themes and upload tasks; cookie
//! capture and login automation live outside this system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a social account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Credentials are valid.
    Active,
    /// Credentials have expired and need refresh.
    Expired,
    /// Account is disabled by the operator.
    Disabled,
}

/// A social platform account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Platform name (e.g. "douyin", "bilibili").
    pub platform: String,
    /// Account login name.
    pub username: String,
    /// Display name shown in listings.
    pub display_name: Option<String>,
    /// Current status.
    pub status: AccountStatus,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    /// Platform name.
    pub platform: String,
    /// Account login name.
    pub username: String,
    /// Display name.
    pub display_name: Option<String>,
}
