//! Account handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use themehub_entity::account::{Account, CreateAccount};

use crate::error::{ok, ApiResult};
use crate::state::AppState;

/// GET /api/accounts
pub async fn list_accounts(State(state): State<AppState>) -> ApiResult<Vec<Account>> {
    let accounts = state.accounts.list().await?;
    ok(accounts)
}

/// POST /api/accounts
pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccount>,
) -> ApiResult<Account> {
    let account = state.accounts.create(&body).await?;
    ok(account)
}

/// GET /api/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Account> {
    let account = state.accounts.get(id).await?;
    ok(account)
}

/// DELETE /api/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state.accounts.delete(id).await?;
    ok(())
}
