//! # themehub-api
//!
//! Axum HTTP layer: routing, state wiring, and the mapping from domain
//! errors to the `{code, message, data}` response envelope.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
