//! Health check handler.

use crate::error::{ok, ApiResult};

/// GET /api/health
pub async fn health() -> ApiResult<serde_json::Value> {
    ok(serde_json::json!({ "status": "ok" }))
}
