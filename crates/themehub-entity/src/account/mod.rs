//! Social account entity.

pub mod model;

pub use model::{Account, AccountStatus, CreateAccount};
