//! Shared test fixtures for the service crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use themehub_core::error::AppError;
use themehub_core::result::AppResult;
use themehub_core::traits::sink::{CreateUploadTask, UploadTaskSink};
use themehub_core::traits::store::{ResourceEntry, ResourceStore, ResourceStoreSource};
use themehub_entity::theme::{ResourceRoot, Theme, ThemeDetail};
use themehub_storage::providers::local::LocalResourceStore;

/// A store source over a fixed library → store map.
#[derive(Debug, Default)]
pub struct StaticStoreSource {
    stores: HashMap<Uuid, Arc<dyn ResourceStore>>,
}

impl StaticStoreSource {
    pub fn with(library_id: Uuid, store: Arc<dyn ResourceStore>) -> Self {
        let mut stores = HashMap::new();
        stores.insert(library_id, store);
        Self { stores }
    }
}

#[async_trait]
impl ResourceStoreSource for StaticStoreSource {
    async fn store_for(&self, library_id: Uuid) -> AppResult<Arc<dyn ResourceStore>> {
        self.stores
            .get(&library_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Library not found: {library_id}")))
    }
}

/// A task sink that records every created task.
#[derive(Debug, Default)]
pub struct RecordingSink {
    created: Mutex<Vec<CreateUploadTask>>,
}

impl RecordingSink {
    pub fn created(&self) -> Vec<CreateUploadTask> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadTaskSink for RecordingSink {
    async fn create_task(&self, task: &CreateUploadTask) -> AppResult<Uuid> {
        self.created.lock().unwrap().push(task.clone());
        Ok(Uuid::new_v4())
    }
}

/// A task sink that rejects tasks for one account and records the rest.
#[derive(Debug)]
pub struct RejectingSink {
    inner: RecordingSink,
    reject_account: Uuid,
}

impl RejectingSink {
    pub fn new(reject_account: Uuid) -> Self {
        Self {
            inner: RecordingSink::default(),
            reject_account,
        }
    }

    pub fn created(&self) -> Vec<CreateUploadTask> {
        self.inner.created()
    }
}

#[async_trait]
impl UploadTaskSink for RejectingSink {
    async fn create_task(&self, task: &CreateUploadTask) -> AppResult<Uuid> {
        if task.account_id == self.reject_account {
            return Err(AppError::database("Injected task insert failure"));
        }
        self.inner.create_task(task).await
    }
}

/// Delegating store that fails `move_entry` for one source path.
#[derive(Debug)]
pub struct FailingMoveStore {
    inner: Arc<dyn ResourceStore>,
    fail_from: String,
}

impl FailingMoveStore {
    pub fn new(inner: Arc<dyn ResourceStore>, fail_from: &str) -> Self {
        Self {
            inner,
            fail_from: fail_from.to_string(),
        }
    }
}

#[async_trait]
impl ResourceStore for FailingMoveStore {
    fn store_type(&self) -> &str {
        self.inner.store_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn list(&self, path: &str) -> AppResult<Vec<ResourceEntry>> {
        self.inner.list(path).await
    }

    async fn get_info(&self, path: &str) -> AppResult<ResourceEntry> {
        self.inner.get_info(path).await
    }

    async fn create_folder(&self, path: &str) -> AppResult<()> {
        self.inner.create_folder(path).await
    }

    async fn move_entry(&self, from: &str, to: &str) -> AppResult<()> {
        if from == self.fail_from {
            return Err(AppError::storage(format!("Injected move failure: {from}")));
        }
        self.inner.move_entry(from, to).await
    }
}

/// Create a file (and its parents) under a temp dir.
pub fn write_file(dir: &tempfile::TempDir, rel: &str) {
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"data").unwrap();
}

/// A local store rooted at the temp dir, wrapped in a one-library source.
pub async fn local_source(dir: &tempfile::TempDir) -> (Uuid, Arc<dyn ResourceStoreSource>) {
    let store = LocalResourceStore::new(dir.path().to_str().unwrap())
        .await
        .unwrap();
    let library_id = Uuid::new_v4();
    let source = StaticStoreSource::with(library_id, Arc::new(store));
    (library_id, Arc::new(source))
}

/// A theme detail with the default archive folder and the given roots.
pub fn theme_detail(library_id: Uuid, roots: &[&str]) -> ThemeDetail {
    let now = Utc::now();
    let theme_id = Uuid::new_v4();
    let resource_roots = roots
        .iter()
        .enumerate()
        .map(|(idx, folder_path)| ResourceRoot {
            id: Uuid::new_v4(),
            theme_id,
            library_id,
            folder_path: folder_path.to_string(),
            position: idx as i64,
            created_at: now,
        })
        .collect();

    ThemeDetail {
        theme: Theme {
            id: theme_id,
            name: "test theme".to_string(),
            description: None,
            archive_folder_name: "published".to_string(),
            created_at: now,
            updated_at: now,
        },
        linked_account_ids: Vec::new(),
        resource_roots,
    }
}
