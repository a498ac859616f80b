use std::sync::Arc;

use tracing::warn;
use vidwatch_core::{ContentIdentifier, RecommendationItem};
use vidwatch_metadata::MetadataSource;

pub const MAX_RECOMMENDATIONS: usize = 10;

/// Fetches related items, keeping the first [`MAX_RECOMMENDATIONS`] in
/// backend order. Duplicates are kept. Failure yields an empty list.
#[derive(Clone)]
pub struct RecommendationFetcher {
    source: Arc<dyn MetadataSource>,
}

impl RecommendationFetcher {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, identifier: ContentIdentifier) -> Vec<RecommendationItem> {
        match self.source.recommendations(identifier).await {
            Ok(mut items) => {
                items.truncate(MAX_RECOMMENDATIONS);
                items
            }
            Err(e) => {
                warn!(%identifier, error = %e, "failed to fetch recommendations");
                Vec::new()
            }
        }
    }
}
