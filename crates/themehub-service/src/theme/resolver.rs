//! Video status resolver.
//!
//! Publish state is never stored. Each call walks every resource root's
//! first level plus its archive subfolder and derives `is_published` from
//! placement alone, so the inventory always reflects current filesystem
//! truth.

use std::sync::Arc;

use tracing::warn;

use themehub_core::paths;
use themehub_core::result::AppResult;
use themehub_core::traits::store::{ResourceEntry, ResourceStoreSource};
use themehub_entity::theme::ThemeDetail;
use themehub_entity::video::VideoEntry;

/// Resolves the unified video inventory for a theme.
#[derive(Debug, Clone)]
pub struct VideoResolver {
    source: Arc<dyn ResourceStoreSource>,
}

impl VideoResolver {
    /// Create a resolver backed by the given store source.
    pub fn new(source: Arc<dyn ResourceStoreSource>) -> Self {
        Self { source }
    }

    /// Resolve all videos under a theme's resource roots.
    ///
    /// Roots are visited in declaration order; within a root, main-folder
    /// entries precede archive entries. A root whose library or main folder
    /// is unreachable is logged and skipped rather than aborting the call,
    /// and a missing archive folder contributes zero published entries.
    pub async fn resolve(&self, detail: &ThemeDetail) -> AppResult<Vec<VideoEntry>> {
        let archive_name = &detail.theme.archive_folder_name;
        let mut videos = Vec::new();

        for root in &detail.resource_roots {
            let store = match self.source.store_for(root.library_id).await {
                Ok(store) => store,
                Err(err) => {
                    warn!(
                        theme_id = %detail.theme.id,
                        library_id = %root.library_id,
                        folder_path = %root.folder_path,
                        error = %err,
                        "Skipping resource root with unreachable library"
                    );
                    continue;
                }
            };

            let main_entries = match store.list(&root.folder_path).await {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        theme_id = %detail.theme.id,
                        folder_path = %root.folder_path,
                        error = %err,
                        "Skipping resource root that failed to list"
                    );
                    continue;
                }
            };
            for entry in video_files(&main_entries) {
                videos.push(VideoEntry::new(
                    entry.name.clone(),
                    root.library_id,
                    root.folder_path.clone(),
                    entry.size_bytes,
                    entry.modified_at,
                    false,
                ));
            }

            let archive_path = paths::join(&root.folder_path, archive_name);
            // A missing archive folder means zero published videos, not an
            // error for the root.
            let archive_entries = store.list(&archive_path).await.unwrap_or_default();
            for entry in video_files(&archive_entries) {
                videos.push(VideoEntry::new(
                    entry.name.clone(),
                    root.library_id,
                    archive_path.clone(),
                    entry.size_bytes,
                    entry.modified_at,
                    true,
                ));
            }
        }

        Ok(videos)
    }
}

/// Filter a listing down to video files.
fn video_files(entries: &[ResourceEntry]) -> impl Iterator<Item = &ResourceEntry> {
    entries
        .iter()
        .filter(|e| !e.is_directory && paths::is_video(&e.name))
}
