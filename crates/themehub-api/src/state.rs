//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use themehub_core::config::AppConfig;
use themehub_core::traits::sink::UploadTaskSink;
use themehub_core::traits::store::ResourceStoreSource;
use themehub_database::repositories::{
    AccountRepository, LibraryRepository, TaskRepository, ThemeRepository,
};
use themehub_service::account::AccountService;
use themehub_service::library::LibraryService;
use themehub_service::task::TaskService;
use themehub_service::theme::{
    ArchiveEngine, BatchPublisher, StatisticsAggregator, ThemeService, VideoResolver,
};
use themehub_storage::registry::ResourceStoreRegistry;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Theme registry operations.
    pub themes: Arc<ThemeService>,
    /// Account registry operations.
    pub accounts: Arc<AccountService>,
    /// Library management and store resolution.
    pub libraries: Arc<LibraryService>,
    /// Upload task lifecycle.
    pub tasks: Arc<TaskService>,
    /// Video inventory resolution.
    pub resolver: Arc<VideoResolver>,
    /// Archive and unarchive moves.
    pub archive: Arc<ArchiveEngine>,
    /// Batch publish fan-out.
    pub publisher: Arc<BatchPublisher>,
    /// Publish statistics.
    pub statistics: Arc<StatisticsAggregator>,
}

impl AppState {
    /// Wire all services over a database pool.
    ///
    /// The library service doubles as the store source injected into the
    /// video pipeline; the task repository doubles as the task sink.
    pub fn build(config: AppConfig, pool: SqlitePool) -> Self {
        let theme_repo = ThemeRepository::new(pool.clone());
        let account_repo = AccountRepository::new(pool.clone());
        let library_repo = LibraryRepository::new(pool.clone());
        let task_repo = TaskRepository::new(pool.clone());

        let registry = Arc::new(ResourceStoreRegistry::new());
        let libraries = Arc::new(LibraryService::new(library_repo.clone(), registry));
        let source: Arc<dyn ResourceStoreSource> = libraries.clone();

        let resolver = Arc::new(VideoResolver::new(source.clone()));
        let archive = Arc::new(ArchiveEngine::new(source.clone(), resolver.clone()));
        let sink: Arc<dyn UploadTaskSink> = Arc::new(task_repo.clone());
        let publisher = Arc::new(BatchPublisher::new(resolver.clone(), sink));
        let statistics = Arc::new(StatisticsAggregator::new(resolver.clone()));

        let themes = Arc::new(ThemeService::new(
            theme_repo.clone(),
            account_repo.clone(),
            library_repo,
            source,
            config.themes.clone(),
        ));
        let accounts = Arc::new(AccountService::new(account_repo));
        let tasks = Arc::new(TaskService::new(task_repo, theme_repo, archive.clone()));

        Self {
            config: Arc::new(config),
            themes,
            accounts,
            libraries,
            tasks,
            resolver,
            archive,
            publisher,
            statistics,
        }
    }
}
