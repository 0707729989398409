//! # themehub-entity
//!
//! Persisted domain models (themes, accounts, libraries, upload tasks) and
//! the derived video inventory entry. Publish state is never stored here:
//! [`video::VideoEntry`] is materialized per listing call from filesystem
//! positions alone.

pub mod account;
pub mod library;
pub mod task;
pub mod theme;
pub mod video;
