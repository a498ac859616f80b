use serde::Serialize;
use vidwatch_core::{ContentIdentifier, Episode, Provider, RecommendationItem, SeasonSummary};

use crate::navigator::NavigatorPhase;

/// Renderable snapshot of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionView {
    Uninitialized,
    /// Terminal: offer navigation away, never retry.
    NotFound {
        code: &'static str,
        message: String,
    },
    Watching(Box<WatchView>),
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchView {
    pub identifier: ContentIdentifier,
    pub section: &'static str,
    pub title: String,
    pub overview: String,
    pub provider: Provider,
    pub provider_name: &'static str,
    pub video_url: String,
    /// `S1 • E3`, series only.
    pub badge: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub phase: Option<NavigatorPhase>,
    pub seasons: Vec<SeasonSummary>,
    pub episodes: Vec<Episode>,
    pub recommendations: Vec<RecommendationItem>,
    pub loading: LoadingFlags,
}

/// Regions still waiting on a fetch. A hung request keeps its flag set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingFlags {
    pub metadata: bool,
    pub recommendations: bool,
    pub seasons: bool,
    pub episodes: bool,
}

impl LoadingFlags {
    pub fn any(&self) -> bool {
        self.metadata || self.recommendations || self.seasons || self.episodes
    }
}

impl SessionView {
    /// Breadcrumb line, e.g. `Home >> TV Shows >> Game of Thrones`.
    pub fn breadcrumb(&self) -> Option<String> {
        match self {
            Self::Watching(w) => Some(format!("Home >> {} >> {}", w.section, w.title)),
            _ => None,
        }
    }
}
