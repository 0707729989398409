//! Derived video inventory entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A video discovered under a theme's resource roots.
///
/// Never persisted: entries are materialized per listing call and publish
/// state is entirely positional. A video directly under a resource root is
/// unpublished; a video inside the root's archive subfolder is published.
/// The entry for a path ceases to exist the instant the file moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    /// File name.
    pub name: String,
    /// Canonical full path within the library.
    pub path: String,
    /// Canonical full path within the library (same value as `path`).
    pub full_path: String,
    /// Library the video lives in.
    pub library_id: Uuid,
    /// Directory the video currently sits in.
    pub library_path: String,
    /// Size in bytes (if known).
    pub size_bytes: Option<u64>,
    /// Last modified timestamp (if known).
    pub modified_at: Option<DateTime<Utc>>,
    /// Whether the video resides inside the archive subfolder.
    pub is_published: bool,
    /// Entry type discriminator, always `"video"`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl VideoEntry {
    /// Build an entry for a video sitting in `library_path`.
    pub fn new(
        name: String,
        library_id: Uuid,
        library_path: String,
        size_bytes: Option<u64>,
        modified_at: Option<DateTime<Utc>>,
        is_published: bool,
    ) -> Self {
        let full_path = themehub_core::paths::join(&library_path, &name);
        Self {
            name,
            path: full_path.clone(),
            full_path,
            library_id,
            library_path,
            size_bytes,
            modified_at,
            is_published,
            kind: "video".to_string(),
        }
    }
}
