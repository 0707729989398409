//! Repository implementations.

pub mod account;
pub mod library;
pub mod task;
pub mod theme;

pub use account::AccountRepository;
pub use library::LibraryRepository;
pub use task::TaskRepository;
pub use theme::ThemeRepository;
