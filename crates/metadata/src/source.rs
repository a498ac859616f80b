use vidwatch_core::{ContentIdentifier, ContentMetadata, Episode, RecommendationItem, SeasonSummary};

use crate::MetadataError;

/// The metadata backend consumed by a playback session.
///
/// Implementations perform one request per call: no retry, no caching.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    fn name(&self) -> &str;

    /// Title, overview and (for series) the season list.
    async fn content(&self, identifier: ContentIdentifier)
    -> Result<ContentMetadata, MetadataError>;

    /// Season list of a series, in backend order.
    async fn seasons(&self, series_id: u64) -> Result<Vec<SeasonSummary>, MetadataError>;

    /// Episode list for one season of a series.
    async fn season_episodes(
        &self,
        series_id: u64,
        season_number: u32,
    ) -> Result<Vec<Episode>, MetadataError>;

    /// Related items, untruncated, in backend order.
    async fn recommendations(
        &self,
        identifier: ContentIdentifier,
    ) -> Result<Vec<RecommendationItem>, MetadataError>;
}
