//! # themehub-storage
//!
//! [`ResourceStore`] backends and the per-library store registry.
//!
//! [`ResourceStore`]: themehub_core::traits::store::ResourceStore

pub mod providers;
pub mod registry;
