//! Upload task entity.

pub mod model;

pub use model::{TaskStatus, UploadTask};
