//! Publish statistics, derived from the resolved inventory on every call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use themehub_core::result::AppResult;
use themehub_entity::theme::ThemeDetail;

use super::resolver::VideoResolver;

/// Partition counts over a theme's video inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStats {
    pub published: usize,
    pub unpublished: usize,
}

/// Counts published vs. unpublished videos for a theme. No caching; the
/// counts reflect filesystem truth at call time.
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    resolver: Arc<VideoResolver>,
}

impl StatisticsAggregator {
    /// Create an aggregator over the given resolver.
    pub fn new(resolver: Arc<VideoResolver>) -> Self {
        Self { resolver }
    }

    /// Compute the publish statistics for a theme.
    pub async fn statistics(&self, detail: &ThemeDetail) -> AppResult<PublishStats> {
        let videos = self.resolver.resolve(detail).await?;
        let published = videos.iter().filter(|v| v.is_published).count();
        Ok(PublishStats {
            published,
            unpublished: videos.len() - published,
        })
    }
}
