//! # themehub-service
//!
//! Business logic for ThemeHub. The theme video pipeline lives in
//! [`theme`]: status resolution, archive moves, batch publish fan-out and
//! statistics. [`library`] resolves resource stores per library and
//! [`task`] handles upload task lifecycle reporting.

pub mod account;
pub mod library;
pub mod task;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;
