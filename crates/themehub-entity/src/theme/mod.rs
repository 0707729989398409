//! Theme entity.

pub mod model;

pub use model::{CreateTheme, ResourceRoot, Theme, ThemeDetail, UpdateTheme};
