//! Resource library entity.

pub mod model;

pub use model::{
    CreateLibrary, Library, LibraryProvider, LocalLibraryConfig, UpdateLibrary,
    WebdavLibraryConfig,
};
