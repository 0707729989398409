//! Local filesystem resource store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use themehub_core::error::{AppError, ErrorKind};
use themehub_core::paths;
use themehub_core::result::AppResult;
use themehub_core::traits::store::{ResourceEntry, ResourceStore};

/// Local filesystem resource store.
#[derive(Debug, Clone)]
pub struct LocalResourceStore {
    /// Root directory all library paths resolve under.
    root: PathBuf,
}

impl LocalResourceStore {
    /// Create a new local store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create store root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a library path to an absolute path within the root.
    fn resolve(&self, path: &str) -> PathBuf {
        let clean = path.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceStore for LocalResourceStore {
    fn store_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn list(&self, path: &str) -> AppResult<Vec<ResourceEntry>> {
        let full_path = self.resolve(path);
        if !full_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list directory: {path}"),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            if paths::is_hidden(&name) {
                continue;
            }

            let meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;

            let modified_at = meta
                .modified()
                .ok()
                .map(chrono::DateTime::<chrono::Utc>::from);

            entries.push(ResourceEntry {
                path: paths::join(path, &name),
                name,
                is_directory: meta.is_dir(),
                size_bytes: if meta.is_file() { Some(meta.len()) } else { None },
                modified_at,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    async fn get_info(&self, path: &str) -> AppResult<ResourceEntry> {
        let full_path = self.resolve(path);
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Path not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to get metadata: {path}"),
                    e,
                )
            }
        })?;

        let modified_at = meta
            .modified()
            .ok()
            .map(chrono::DateTime::<chrono::Utc>::from);

        Ok(ResourceEntry {
            name: paths::base_name(path).to_string(),
            path: path.to_string(),
            is_directory: meta.is_dir(),
            size_bytes: if meta.is_file() { Some(meta.len()) } else { None },
            modified_at,
        })
    }

    async fn create_folder(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path);
        fs::create_dir_all(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create directory: {path}"),
                e,
            )
        })?;
        debug!(path, "Created directory");
        Ok(())
    }

    async fn move_entry(&self, from: &str, to: &str) -> AppResult<()> {
        let from_path = self.resolve(from);
        let to_path = self.resolve(to);

        if !from_path.exists() {
            return Err(AppError::not_found(format!("Source not found: {from}")));
        }
        if to_path.exists() {
            return Err(AppError::conflict(format!("Target already exists: {to}")));
        }
        self.ensure_parent(&to_path).await?;

        fs::rename(&from_path, &to_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to move {from} -> {to}"),
                e,
            )
        })?;

        debug!(from, to, "Moved entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themehub_core::error::ErrorKind;

    async fn store() -> (tempfile::TempDir, LocalResourceStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalResourceStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, store)
    }

    async fn write_file(dir: &tempfile::TempDir, rel: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"data").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_sorts_and_skips_hidden() {
        let (dir, store) = store().await;
        write_file(&dir, "videos/b.mp4").await;
        write_file(&dir, "videos/a.mp4").await;
        write_file(&dir, "videos/.hidden.mp4").await;

        let entries = store.list("/videos").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.mp4", "b.mp4"]);
        assert_eq!(entries[0].path, "/videos/a.mp4");
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let (_dir, store) = store().await;
        assert!(store.list("/videos/published").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_info_not_found() {
        let (_dir, store) = store().await;
        let err = store.get_info("/nope.mp4").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_move_creates_target_parents() {
        let (dir, store) = store().await;
        write_file(&dir, "videos/a.mp4").await;

        store
            .move_entry("/videos/a.mp4", "/videos/published/a.mp4")
            .await
            .unwrap();

        assert!(dir.path().join("videos/published/a.mp4").exists());
        assert!(!dir.path().join("videos/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_move_refuses_existing_target() {
        let (dir, store) = store().await;
        write_file(&dir, "videos/a.mp4").await;
        write_file(&dir, "videos/published/a.mp4").await;

        let err = store
            .move_entry("/videos/a.mp4", "/videos/published/a.mp4")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        // Source is untouched.
        assert!(dir.path().join("videos/a.mp4").exists());
    }

    #[tokio::test]
    async fn test_move_missing_source() {
        let (_dir, store) = store().await;
        let err = store
            .move_entry("/videos/a.mp4", "/videos/published/a.mp4")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
