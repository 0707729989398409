//! Theme subsystem: registry service plus the video pipeline built on it.

pub mod archive;
pub mod publish;
pub mod resolver;
pub mod service;
pub mod statistics;

pub use archive::{ArchiveEngine, MoveReport, MoveResult};
pub use publish::{BatchPublisher, CreatedTask, FailedTask, PublishReport, PublishRequest};
pub use resolver::VideoResolver;
pub use service::ThemeService;
pub use statistics::{PublishStats, StatisticsAggregator};
