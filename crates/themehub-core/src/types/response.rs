//! Response envelope for API endpoints.

use serde::{Deserialize, Serialize};

/// Standard API response wrapper.
///
/// Every endpoint returns `{code, message, data}`: `code` is 200 on success
/// (including partial batch failures, which embed a `failed` count in
/// `data`) and >= 400 on validation or internal errors, where `data` is
/// omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Status code mirroring the HTTP status.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Payload, omitted on errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Error response with a status code and message.
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}
