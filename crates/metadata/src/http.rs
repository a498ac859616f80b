//! HTTP client for the metadata backend.
//!
//! Endpoints:
//! - `GET /api/{type}/{id}`
//! - `GET /api/tv/{id}/season/{n}`
//! - `GET /api/{type}/{id}/recommendations`

use chrono::NaiveDate;
use tracing::debug;
use vidwatch_core::types::{PLACEHOLDER_OVERVIEW, PLACEHOLDER_TITLE};
use vidwatch_core::{
    ContentIdentifier, ContentMetadata, Episode, MediaType, RecommendationItem, SeasonSummary,
};

use crate::MetadataError;
use crate::source::MetadataSource;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            user_agent: concat!("vidwatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct HttpMetadataClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMetadataClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .unwrap_or_default();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, MetadataError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "metadata request");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Status(resp.status().as_u16()));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Malformed(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataSource for HttpMetadataClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn content(
        &self,
        identifier: ContentIdentifier,
    ) -> Result<ContentMetadata, MetadataError> {
        let data = self
            .get_json(&format!("/api/{}/{}", identifier.media_type, identifier.id))
            .await?;
        parse_content(&data)
    }

    async fn seasons(&self, series_id: u64) -> Result<Vec<SeasonSummary>, MetadataError> {
        let data = self.get_json(&format!("/api/tv/{series_id}")).await?;
        expect_object(&data)?;
        Ok(parse_seasons(&data))
    }

    async fn season_episodes(
        &self,
        series_id: u64,
        season_number: u32,
    ) -> Result<Vec<Episode>, MetadataError> {
        let data = self
            .get_json(&format!("/api/tv/{series_id}/season/{season_number}"))
            .await?;
        parse_episodes(&data)
    }

    async fn recommendations(
        &self,
        identifier: ContentIdentifier,
    ) -> Result<Vec<RecommendationItem>, MetadataError> {
        let data = self
            .get_json(&format!(
                "/api/{}/{}/recommendations",
                identifier.media_type, identifier.id
            ))
            .await?;
        parse_recommendations(&data, identifier.media_type)
    }
}

fn expect_object(data: &serde_json::Value) -> Result<(), MetadataError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(MetadataError::Malformed("expected a JSON object".into()))
    }
}

/// First non-empty string among `keys`.
fn first_str<'a>(data: &'a serde_json::Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| data[*k].as_str())
        .find(|s| !s.is_empty())
}

fn as_u32(value: &serde_json::Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}

pub(crate) fn parse_content(data: &serde_json::Value) -> Result<ContentMetadata, MetadataError> {
    expect_object(data)?;

    Ok(ContentMetadata {
        title: first_str(data, &["title", "name"])
            .unwrap_or(PLACEHOLDER_TITLE)
            .to_string(),
        overview: first_str(data, &["overview"])
            .unwrap_or(PLACEHOLDER_OVERVIEW)
            .to_string(),
        seasons: parse_seasons(data),
    })
}

/// Seasons without a usable `season_number` are dropped.
pub(crate) fn parse_seasons(data: &serde_json::Value) -> Vec<SeasonSummary> {
    let seasons = data["seasons"].as_array().cloned().unwrap_or_default();

    seasons
        .iter()
        .filter_map(|s| {
            let number = as_u32(&s["season_number"])?;
            Some(SeasonSummary {
                number,
                name: first_str(s, &["name"])
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("Season {number}")),
                episode_count: as_u32(&s["episode_count"]).unwrap_or(0),
            })
        })
        .collect()
}

pub(crate) fn parse_episodes(data: &serde_json::Value) -> Result<Vec<Episode>, MetadataError> {
    expect_object(data)?;
    let episodes = data["episodes"].as_array().cloned().unwrap_or_default();

    Ok(episodes
        .iter()
        .filter_map(|ep| {
            Some(Episode {
                number: as_u32(&ep["episode_number"])?,
                name: ep["name"].as_str().unwrap_or("").to_string(),
                runtime_minutes: as_u32(&ep["runtime"]),
                air_date: ep["air_date"]
                    .as_str()
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            })
        })
        .collect())
}

/// Accepts either a bare array or a `{ "results": [...] }` page.
///
/// Items without `media_type` (or with one that is not a playable type)
/// inherit `fallback_type`, the type of the content they were requested for.
pub(crate) fn parse_recommendations(
    data: &serde_json::Value,
    fallback_type: MediaType,
) -> Result<Vec<RecommendationItem>, MetadataError> {
    let items = match data {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(_) => match data["results"].as_array() {
            Some(items) => items,
            None => return Ok(Vec::new()),
        },
        _ => {
            return Err(MetadataError::Malformed(
                "expected a recommendation list".into(),
            ));
        }
    };

    Ok(items
        .iter()
        .filter_map(|r| {
            Some(RecommendationItem {
                id: r["id"].as_u64()?,
                media_type: r["media_type"]
                    .as_str()
                    .and_then(MediaType::from_str)
                    .unwrap_or(fallback_type),
                title: first_str(r, &["title", "name"])
                    .unwrap_or(PLACEHOLDER_TITLE)
                    .to_string(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_movie_content_from_json() {
        let json = serde_json::json!({
            "title": "Fight Club",
            "overview": "An insomniac office worker...",
            "release_date": "1999-10-15"
        });

        let meta = parse_content(&json).unwrap();
        assert_eq!(meta.title, "Fight Club");
        assert_eq!(meta.overview, "An insomniac office worker...");
        assert!(meta.seasons.is_empty());
    }

    #[test]
    fn parse_series_content_from_json() {
        let json = serde_json::json!({
            "name": "Game of Thrones",
            "overview": "",
            "seasons": [
                { "season_number": 0, "name": "Specials", "episode_count": 14 },
                { "season_number": 1, "name": "Season 1", "episode_count": 10 },
                { "name": "broken" },
                { "season_number": 2, "episode_count": 10 }
            ]
        });

        let meta = parse_content(&json).unwrap();
        assert_eq!(meta.title, "Game of Thrones");
        assert_eq!(meta.overview, PLACEHOLDER_OVERVIEW);
        assert_eq!(meta.seasons.len(), 3);
        assert_eq!(meta.seasons[0].name, "Specials");
        assert_eq!(meta.seasons[1].episode_count, 10);
        assert_eq!(meta.seasons[2].name, "Season 2");
    }

    #[test]
    fn content_must_be_an_object() {
        let err = parse_content(&serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, MetadataError::Malformed(_)));
        assert_eq!(
            parse_content(&serde_json::json!({})).unwrap().title,
            PLACEHOLDER_TITLE
        );
    }

    #[test]
    fn parse_episodes_from_json() {
        let json = serde_json::json!({
            "episodes": [
                { "episode_number": 1, "name": "Pilot", "runtime": 58, "air_date": "2008-01-20" },
                { "episode_number": 2, "name": "Cat's in the Bag...", "runtime": null, "air_date": "" },
                { "name": "no number" }
            ]
        });

        let episodes = parse_episodes(&json).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].runtime_minutes, Some(58));
        assert_eq!(
            episodes[0].air_date,
            NaiveDate::from_ymd_opt(2008, 1, 20)
        );
        assert_eq!(episodes[1].runtime_minutes, None);
        assert_eq!(episodes[1].air_date, None);

        assert!(parse_episodes(&serde_json::json!({})).unwrap().is_empty());
    }

    #[test]
    fn parse_recommendations_with_fallback_type() {
        let json = serde_json::json!({
            "results": [
                { "id": 1, "title": "A", "media_type": "movie" },
                { "id": 2, "name": "B", "media_type": "tv" },
                { "id": 3, "name": "C" },
                { "title": "no id" },
                { "id": 4, "media_type": "person", "name": "D" }
            ]
        });

        let recs = parse_recommendations(&json, MediaType::Series).unwrap();
        let ids: Vec<u64> = recs.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert_eq!(recs[0].media_type, MediaType::Movie);
        assert_eq!(recs[1].title, "B");
        assert_eq!(recs[2].media_type, MediaType::Series);
        assert_eq!(recs[3].media_type, MediaType::Series);
    }

    #[test]
    fn parse_recommendations_bare_array() {
        let json = serde_json::json!([{ "id": 9, "title": "X" }]);
        let recs = parse_recommendations(&json, MediaType::Movie).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].identifier(), ContentIdentifier::movie(9));

        assert!(parse_recommendations(&serde_json::json!("nope"), MediaType::Movie).is_err());
    }
}
