//! Resource store registry mapping library ids to provider instances.
//!
//! An explicit, injected instance cache with explicit invalidation: stores
//! are registered when a library is first resolved and dropped when its
//! configuration changes, so no component mutates process-global state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use themehub_core::traits::store::ResourceStore;

/// Registry holding references to instantiated resource stores.
#[derive(Debug, Default)]
pub struct ResourceStoreRegistry {
    /// Map of library ID → store instance.
    stores: RwLock<HashMap<Uuid, Arc<dyn ResourceStore>>>,
}

impl ResourceStoreRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Register a store for a library.
    pub async fn register(&self, library_id: Uuid, store: Arc<dyn ResourceStore>) {
        let mut stores = self.stores.write().await;
        stores.insert(library_id, store);
    }

    /// Get the store registered for a library, if any.
    pub async fn get(&self, library_id: Uuid) -> Option<Arc<dyn ResourceStore>> {
        let stores = self.stores.read().await;
        stores.get(&library_id).cloned()
    }

    /// Drop the cached store for a library (call after config changes).
    pub async fn invalidate(&self, library_id: Uuid) {
        let mut stores = self.stores.write().await;
        stores.remove(&library_id);
    }
}
