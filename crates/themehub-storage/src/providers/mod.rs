//! Resource store provider implementations.

pub mod local;
pub mod webdav;

use std::sync::Arc;

use themehub_core::result::AppResult;
use themehub_core::traits::store::ResourceStore;
use themehub_entity::library::{Library, LibraryProvider};

/// Build a store instance from a library's persisted configuration.
pub async fn build_store(library: &Library) -> AppResult<Arc<dyn ResourceStore>> {
    match library.provider {
        LibraryProvider::Local => {
            let config = library.local_config()?;
            let store = local::LocalResourceStore::new(&config.root_path).await?;
            Ok(Arc::new(store))
        }
        LibraryProvider::Webdav => {
            let config = library.webdav_config()?;
            let store =
                webdav::WebdavResourceStore::new(&config.base_url, &config.username, &config.password)?;
            Ok(Arc::new(store))
        }
    }
}
