//! # themehub-database
//!
//! SQLite connection management, migrations, and repository
//! implementations. `TaskRepository` doubles as the [`UploadTaskSink`]
//! consumed by the publish orchestrator.
//!
//! [`UploadTaskSink`]: themehub_core::traits::sink::UploadTaskSink

pub mod connection;
pub mod migration;
pub mod repositories;
