//! Library handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use themehub_entity::library::{CreateLibrary, Library, UpdateLibrary};

use crate::error::{ok, ApiResult};
use crate::state::AppState;

/// GET /api/libraries
pub async fn list_libraries(State(state): State<AppState>) -> ApiResult<Vec<Library>> {
    let libraries = state.libraries.list().await?;
    ok(libraries)
}

/// POST /api/libraries
pub async fn create_library(
    State(state): State<AppState>,
    Json(body): Json<CreateLibrary>,
) -> ApiResult<Library> {
    let library = state.libraries.create(&body).await?;
    ok(library)
}

/// GET /api/libraries/{id}
pub async fn get_library(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Library> {
    let library = state.libraries.get(id).await?;
    ok(library)
}

/// PUT /api/libraries/{id}
pub async fn update_library(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateLibrary>,
) -> ApiResult<Library> {
    let library = state.libraries.update(id, &body).await?;
    ok(library)
}

/// DELETE /api/libraries/{id}
pub async fn delete_library(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.libraries.delete(id).await?;
    ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTest {
    pub reachable: bool,
}

/// POST /api/libraries/{id}/test
pub async fn test_library(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ConnectionTest> {
    let reachable = state.libraries.test_connection(id).await?;
    ok(ConnectionTest { reachable })
}
