//! Route definitions for the ThemeHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use themehub_core::config::AppConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(theme_routes())
        .merge(account_routes())
        .merge(library_routes())
        .merge(task_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Theme registry, relations, and the video pipeline endpoints.
fn theme_routes() -> Router<AppState> {
    Router::new()
        .route("/themes", get(handlers::theme::list_themes))
        .route("/themes", post(handlers::theme::create_theme))
        .route("/themes/{id}", get(handlers::theme::get_theme))
        .route("/themes/{id}", put(handlers::theme::update_theme))
        .route("/themes/{id}", delete(handlers::theme::delete_theme))
        .route("/themes/{id}/accounts", post(handlers::theme::link_account))
        .route(
            "/themes/{id}/accounts/{accountId}",
            delete(handlers::theme::unlink_account),
        )
        .route(
            "/themes/{id}/resource-roots",
            post(handlers::theme::add_resource_root),
        )
        .route(
            "/themes/{id}/resource-roots/{rootId}",
            delete(handlers::theme::remove_resource_root),
        )
        .route("/themes/{id}/videos", get(handlers::theme::list_videos))
        .route("/themes/{id}/statistics", get(handlers::theme::statistics))
        .route(
            "/themes/{id}/videos/archive",
            post(handlers::theme::archive_videos),
        )
        .route(
            "/themes/{id}/videos/unarchive",
            post(handlers::theme::unarchive_videos),
        )
        .route(
            "/themes/{id}/batch-publish",
            post(handlers::theme::batch_publish),
        )
}

/// Account registry endpoints.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(handlers::account::list_accounts))
        .route("/accounts", post(handlers::account::create_account))
        .route("/accounts/{id}", get(handlers::account::get_account))
        .route("/accounts/{id}", delete(handlers::account::delete_account))
}

/// Library management endpoints.
fn library_routes() -> Router<AppState> {
    Router::new()
        .route("/libraries", get(handlers::library::list_libraries))
        .route("/libraries", post(handlers::library::create_library))
        .route("/libraries/{id}", get(handlers::library::get_library))
        .route("/libraries/{id}", put(handlers::library::update_library))
        .route("/libraries/{id}", delete(handlers::library::delete_library))
        .route("/libraries/{id}/test", post(handlers::library::test_library))
}

/// Upload task endpoints.
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks/{id}", get(handlers::task::get_task))
        .route("/tasks/{id}/status", put(handlers::task::update_task_status))
}

/// Health check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = &config.server.cors;
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(cors.max_age_seconds));

    if cors.allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
