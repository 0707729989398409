//! HTTP request handlers, organized by domain.

pub mod account;
pub mod health;
pub mod library;
pub mod task;
pub mod theme;
