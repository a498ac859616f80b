use std::sync::Arc;

use tracing::{debug, warn};
use vidwatch_core::{ContentIdentifier, ContentMetadata};
use vidwatch_metadata::MetadataSource;

/// Fetches top-level metadata. Best effort: one request, no retry, and any
/// failure degrades to [`ContentMetadata::placeholder`].
#[derive(Clone)]
pub struct ContentResolver {
    source: Arc<dyn MetadataSource>,
}

impl ContentResolver {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    pub async fn resolve(&self, identifier: ContentIdentifier) -> ContentMetadata {
        match self.source.content(identifier).await {
            Ok(metadata) => {
                debug!(%identifier, title = %metadata.title, "metadata resolved");
                metadata
            }
            Err(e) => {
                warn!(%identifier, source = self.source.name(), error = %e, "failed to fetch metadata");
                ContentMetadata::placeholder()
            }
        }
    }
}
