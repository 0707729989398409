//! # themehub-core
//!
//! Core crate for ThemeHub. Contains the external-collaborator traits
//! (resource stores, upload task sink), configuration schemas, path
//! utilities, shared response types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ThemeHub crates.

pub mod config;
pub mod error;
pub mod paths;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
