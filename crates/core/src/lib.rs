#![allow(clippy::should_implement_trait)]
pub mod error;
pub mod provider;
pub mod types;

pub use error::SessionError;
pub use provider::Provider;
pub use types::{
    ContentIdentifier, ContentMetadata, Episode, MediaType, RecommendationItem, SeasonSummary,
};
