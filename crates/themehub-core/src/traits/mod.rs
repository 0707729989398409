//! External-collaborator traits consumed by the service core.

pub mod sink;
pub mod store;
