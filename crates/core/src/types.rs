use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Overview shown when the backend has none (or could not be reached).
pub const PLACEHOLDER_OVERVIEW: &str = "No overview available.";
/// Title shown when the backend has none (or could not be reached).
pub const PLACEHOLDER_TITLE: &str = "Untitled";

/// Content kind, spelled the way the backend and the embed providers spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "tv" => Some(Self::Series),
            _ => None,
        }
    }

    pub fn is_series(self) -> bool {
        matches!(self, Self::Series)
    }

    /// Breadcrumb section name.
    pub fn section_label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "TV Shows",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (type, id) pair that defines a whole playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentIdentifier {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub id: u64,
}

impl ContentIdentifier {
    pub fn new(media_type: MediaType, id: u64) -> Self {
        Self { media_type, id }
    }

    pub fn movie(id: u64) -> Self {
        Self::new(MediaType::Movie, id)
    }

    pub fn series(id: u64) -> Self {
        Self::new(MediaType::Series, id)
    }

    /// Parse a navigation query such as `type=tv&id=1399`.
    ///
    /// A leading path (`/watch?...`) or `?` is ignored. Absent or empty
    /// `type`/`id` yields [`SessionError::MissingIdentifier`]; values that are
    /// present but unusable yield [`SessionError::InvalidIdentifier`].
    pub fn from_query(query: &str) -> Result<Self, SessionError> {
        let query = query.split_once('?').map_or(query, |(_, q)| q);

        let mut media_type = None;
        let mut id = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "type" => media_type = Some(value.into_owned()),
                "id" => id = Some(value.into_owned()),
                _ => {}
            }
        }

        let (Some(media_type), Some(id)) = (
            media_type.filter(|t| !t.is_empty()),
            id.filter(|i| !i.is_empty()),
        ) else {
            return Err(SessionError::MissingIdentifier);
        };

        let media_type = MediaType::from_str(&media_type).ok_or_else(|| {
            SessionError::InvalidIdentifier(format!("unknown content type {media_type:?}"))
        })?;
        let id = id
            .parse()
            .map_err(|_| SessionError::InvalidIdentifier(format!("id {id:?} is not numeric")))?;

        Ok(Self::new(media_type, id))
    }

    /// Inverse of [`ContentIdentifier::from_query`].
    pub fn to_query(&self) -> String {
        format!("type={}&id={}", self.media_type, self.id)
    }
}

impl std::fmt::Display for ContentIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.media_type, self.id)
    }
}

/// Top-level metadata for a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub title: String,
    pub overview: String,
    /// Always empty for movies.
    pub seasons: Vec<SeasonSummary>,
}

impl ContentMetadata {
    /// What the session shows while metadata is unavailable.
    pub fn placeholder() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            overview: PLACEHOLDER_OVERVIEW.to_string(),
            seasons: Vec::new(),
        }
    }
}

impl Default for ContentMetadata {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub number: u32,
    pub name: String,
    pub episode_count: u32,
}

impl SeasonSummary {
    /// Season selector label, e.g. `Season 1 (10 episodes)`.
    pub fn label(&self) -> String {
        format!("{} ({} episodes)", self.name, self.episode_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub number: u32,
    pub name: String,
    pub runtime_minutes: Option<u32>,
    pub air_date: Option<NaiveDate>,
}

impl Episode {
    /// Runtime as shown on an episode card (`42m`); zero is treated as unknown.
    pub fn runtime_label(&self) -> Option<String> {
        self.runtime_minutes
            .filter(|m| *m > 0)
            .map(|m| format!("{m}m"))
    }
}

/// A related item surfaced alongside the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
}

impl RecommendationItem {
    pub fn identifier(&self) -> ContentIdentifier {
        ContentIdentifier::new(self.media_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_query_with_leading_path() {
        let id = ContentIdentifier::from_query("/watch?type=tv&id=1399").unwrap();
        assert_eq!(id, ContentIdentifier::series(1399));

        let id = ContentIdentifier::from_query("?id=550&type=movie").unwrap();
        assert_eq!(id, ContentIdentifier::movie(550));
    }

    #[test]
    fn parse_query_missing_parts() {
        for query in ["", "type=movie", "id=550", "type=&id=550", "foo=bar"] {
            assert_eq!(
                ContentIdentifier::from_query(query),
                Err(SessionError::MissingIdentifier),
                "query {query:?}"
            );
        }
    }

    #[test]
    fn parse_query_invalid_parts() {
        let err = ContentIdentifier::from_query("type=person&id=5").unwrap_err();
        assert!(matches!(err, SessionError::InvalidIdentifier(_)));

        let err = ContentIdentifier::from_query("type=movie&id=abc").unwrap_err();
        assert!(matches!(err, SessionError::InvalidIdentifier(_)));
        assert!(err.is_terminal());
    }

    #[test]
    fn query_roundtrip_uses_backend_spelling() {
        let id = ContentIdentifier::series(1399);
        assert_eq!(id.to_query(), "type=tv&id=1399");
        assert_eq!(id.to_string(), "tv/1399");
    }

    #[test]
    fn media_type_serializes_as_path_segment() {
        assert_eq!(serde_json::to_value(MediaType::Series).unwrap(), "tv");
        assert_eq!(MediaType::Series.section_label(), "TV Shows");
    }

    #[test]
    fn labels() {
        let season = SeasonSummary {
            number: 1,
            name: "Season 1".into(),
            episode_count: 10,
        };
        assert_eq!(season.label(), "Season 1 (10 episodes)");

        let mut ep = Episode {
            number: 1,
            name: "Winter Is Coming".into(),
            runtime_minutes: Some(62),
            air_date: None,
        };
        assert_eq!(ep.runtime_label().as_deref(), Some("62m"));
        ep.runtime_minutes = Some(0);
        assert_eq!(ep.runtime_label(), None);
    }
}
