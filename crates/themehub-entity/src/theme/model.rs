//! Theme entity model.
//!
//! A theme is a named grouping of social accounts and resource roots
//! representing one content series to publish. Deleting a theme cascades
//! its relations only; underlying files and accounts are never touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A content theme.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Unique theme identifier.
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Description of this theme.
    pub description: Option<String>,
    /// Name of the archive subfolder under each resource root.
    pub archive_folder_name: String,
    /// When the theme was created.
    pub created_at: DateTime<Utc>,
    /// When the theme was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A directory in some library that a theme treats as a publish staging
/// area. Unique per `(library_id, folder_path)` pair within a theme.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRoot {
    /// Unique root identifier.
    pub id: Uuid,
    /// Theme this root belongs to.
    pub theme_id: Uuid,
    /// Library the folder lives in.
    pub library_id: Uuid,
    /// Directory path within the library.
    pub folder_path: String,
    /// Declaration order within the theme.
    pub position: i64,
    /// When the root was added.
    pub created_at: DateTime<Utc>,
}

/// A theme together with its relations, as consumed by the video services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDetail {
    /// The theme record.
    #[serde(flatten)]
    pub theme: Theme,
    /// Linked account ids.
    pub linked_account_ids: Vec<Uuid>,
    /// Resource roots in declaration order.
    pub resource_roots: Vec<ResourceRoot>,
}

/// Data required to create a new theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTheme {
    /// Human-readable name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Archive subfolder name; falls back to the configured default.
    pub archive_folder_name: Option<String>,
}

/// Data for updating a theme's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTheme {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New archive subfolder name.
    pub archive_folder_name: Option<String>,
}
