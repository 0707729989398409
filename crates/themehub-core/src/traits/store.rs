//! Resource store trait for pluggable library storage backends.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;

/// Metadata about an entry in a resource library.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    /// Entry name (final path component).
    pub name: String,
    /// Full path within the library.
    pub path: String,
    /// Whether this is a directory.
    pub is_directory: bool,
    /// Size in bytes (if known).
    pub size_bytes: Option<u64>,
    /// Last modified timestamp (if known).
    pub modified_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Trait for library storage backends.
///
/// Implementations exist for the local filesystem and WebDAV. The trait is
/// defined here in `themehub-core` and implemented in `themehub-storage`;
/// the service core never branches on backend type.
#[async_trait]
pub trait ResourceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "local", "webdav").
    fn store_type(&self) -> &str;

    /// Check whether the store is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// List the first-level entries of a directory, excluding hidden
    /// entries. Implementations may return an empty list for a missing
    /// directory instead of failing; callers must tolerate either.
    async fn list(&self, path: &str) -> AppResult<Vec<ResourceEntry>>;

    /// Get metadata about a single entry. Fails if the path is absent.
    async fn get_info(&self, path: &str) -> AppResult<ResourceEntry>;

    /// Create a directory, including any missing parents. Not guaranteed to
    /// be idempotent on every backend; guard with [`Self::get_info`] first.
    async fn create_folder(&self, path: &str) -> AppResult<()>;

    /// Move an entry. Fails if the source is absent or the target already
    /// exists; creates missing intermediate target directories.
    async fn move_entry(&self, from: &str, to: &str) -> AppResult<()>;
}

/// Resolves the [`ResourceStore`] serving a given library.
///
/// Injected into the service core instead of a process-global instance
/// cache so tests and requests never share hidden state.
#[async_trait]
pub trait ResourceStoreSource: Send + Sync + std::fmt::Debug {
    /// Get the store for a library, building it if necessary.
    async fn store_for(&self, library_id: Uuid) -> AppResult<Arc<dyn ResourceStore>>;
}
