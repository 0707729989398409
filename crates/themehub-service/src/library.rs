//! Library service and resource store resolution.
//!
//! Implements [`ResourceStoreSource`] over the store registry: stores are
//! built lazily from library configuration and dropped from the registry
//! whenever the configuration changes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use themehub_core::error::AppError;
use themehub_core::result::AppResult;
use themehub_core::traits::store::{ResourceStore, ResourceStoreSource};
use themehub_database::repositories::LibraryRepository;
use themehub_entity::library::{
    CreateLibrary, Library, LibraryProvider, LocalLibraryConfig, UpdateLibrary,
    WebdavLibraryConfig,
};
use themehub_storage::providers::build_store;
use themehub_storage::registry::ResourceStoreRegistry;

/// Service for library management and store resolution.
#[derive(Debug)]
pub struct LibraryService {
    libraries: LibraryRepository,
    registry: Arc<ResourceStoreRegistry>,
}

impl LibraryService {
    /// Create a new library service.
    pub fn new(libraries: LibraryRepository, registry: Arc<ResourceStoreRegistry>) -> Self {
        Self {
            libraries,
            registry,
        }
    }

    /// Register a library after validating its provider configuration.
    pub async fn create(&self, data: &CreateLibrary) -> AppResult<Library> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Library name must not be empty"));
        }
        validate_config(data.provider, &data.config)?;
        let library = self.libraries.create(data).await?;
        info!(library_id = %library.id, name = %library.name, "Registered library");
        Ok(library)
    }

    /// List all libraries.
    pub async fn list(&self) -> AppResult<Vec<Library>> {
        self.libraries.find_all().await
    }

    /// Get a library, failing if it does not exist.
    pub async fn get(&self, id: Uuid) -> AppResult<Library> {
        self.libraries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Library not found: {id}")))
    }

    /// Update a library and drop its cached store.
    pub async fn update(&self, id: Uuid, data: &UpdateLibrary) -> AppResult<Library> {
        if let Some(config) = &data.config {
            let current = self.get(id).await?;
            validate_config(current.provider, config)?;
        }
        let library = self
            .libraries
            .update(id, data)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Library not found: {id}")))?;
        self.registry.invalidate(id).await;
        Ok(library)
    }

    /// Delete a library and drop its cached store.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.libraries.delete(id).await? {
            return Err(AppError::not_found(format!("Library not found: {id}")));
        }
        self.registry.invalidate(id).await;
        info!(library_id = %id, "Deleted library");
        Ok(())
    }

    /// Probe whether the library's backend is reachable.
    pub async fn test_connection(&self, id: Uuid) -> AppResult<bool> {
        let store = self.store_for(id).await?;
        store.health_check().await
    }
}

#[async_trait]
impl ResourceStoreSource for LibraryService {
    async fn store_for(&self, library_id: Uuid) -> AppResult<Arc<dyn ResourceStore>> {
        if let Some(store) = self.registry.get(library_id).await {
            return Ok(store);
        }

        let library = self.get(library_id).await?;
        let store = build_store(&library).await?;
        self.registry.register(library_id, store.clone()).await;
        debug!(library_id = %library_id, store_type = store.store_type(), "Built resource store");
        Ok(store)
    }
}

/// Check that a config document parses for the given provider.
fn validate_config(provider: LibraryProvider, config: &serde_json::Value) -> AppResult<()> {
    let result = match provider {
        LibraryProvider::Local => {
            serde_json::from_value::<LocalLibraryConfig>(config.clone()).map(|_| ())
        }
        LibraryProvider::Webdav => {
            serde_json::from_value::<WebdavLibraryConfig>(config.clone()).map(|_| ())
        }
    };
    result.map_err(|e| AppError::validation(format!("Invalid library configuration: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use themehub_core::config::DatabaseConfig;
    use themehub_core::error::ErrorKind;

    async fn test_pool() -> SqlitePool {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connect_timeout_seconds: 5,
        };
        let pool = themehub_database::connection::create_pool(&config).await.unwrap();
        themehub_database::migration::run_migrations(&pool).await.unwrap();
        pool
    }

    fn local_create(dir: &tempfile::TempDir) -> CreateLibrary {
        CreateLibrary {
            name: "lib".to_string(),
            description: None,
            provider: LibraryProvider::Local,
            config: serde_json::json!({ "rootPath": dir.path().to_str().unwrap() }),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_config() {
        let pool = test_pool().await;
        let service = LibraryService::new(
            LibraryRepository::new(pool),
            Arc::new(ResourceStoreRegistry::new()),
        );

        let err = service
            .create(&CreateLibrary {
                name: "lib".to_string(),
                description: None,
                provider: LibraryProvider::Local,
                config: serde_json::json!({}),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_store_for_caches_instance() {
        let pool = test_pool().await;
        let registry = Arc::new(ResourceStoreRegistry::new());
        let service = LibraryService::new(LibraryRepository::new(pool), registry.clone());

        let dir = tempfile::tempdir().unwrap();
        let library = service.create(&local_create(&dir)).await.unwrap();

        assert!(registry.get(library.id).await.is_none());
        let first = service.store_for(library.id).await.unwrap();
        assert!(registry.get(library.id).await.is_some());
        let second = service.store_for(library.id).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_update_invalidates_cached_store() {
        let pool = test_pool().await;
        let registry = Arc::new(ResourceStoreRegistry::new());
        let service = LibraryService::new(LibraryRepository::new(pool), registry.clone());

        let dir = tempfile::tempdir().unwrap();
        let library = service.create(&local_create(&dir)).await.unwrap();
        service.store_for(library.id).await.unwrap();

        let other = tempfile::tempdir().unwrap();
        service
            .update(
                library.id,
                &UpdateLibrary {
                    name: None,
                    description: None,
                    config: Some(serde_json::json!({ "rootPath": other.path().to_str().unwrap() })),
                },
            )
            .await
            .unwrap();
        assert!(registry.get(library.id).await.is_none());
    }

    #[tokio::test]
    async fn test_store_for_unknown_library() {
        let pool = test_pool().await;
        let service = LibraryService::new(
            LibraryRepository::new(pool),
            Arc::new(ResourceStoreRegistry::new()),
        );
        let err = service.store_for(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
