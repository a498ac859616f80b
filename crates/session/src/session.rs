//! Playback session orchestrator.
//!
//! A session owns every piece of view-state for one content identifier.
//! Fetches are queued as futures and driven cooperatively by the owner via
//! [`PlaybackSession::next_event`] / [`PlaybackSession::settle`]; nothing is
//! spawned, so all mutation happens on the caller's task.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use vidwatch_core::{
    ContentIdentifier, ContentMetadata, Episode, Provider, RecommendationItem, SeasonSummary,
    SessionError,
};
use vidwatch_metadata::MetadataSource;

use crate::navigator::{
    DEFAULT_SEASON, EpisodeTicket, FIRST_EPISODE, NavigatorPhase, SeasonEpisodeNavigator,
};
use crate::recommendations::RecommendationFetcher;
use crate::resolver::ContentResolver;
use crate::view::{LoadingFlags, SessionView, WatchView};

/// Provider and position, as fed to URL construction.
///
/// For movies the season/episode fields are present but never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub provider: Provider,
    pub current_season: u32,
    pub current_episode: u32,
}

/// What a completed fetch did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MetadataResolved,
    RecommendationsLoaded(usize),
    SeasonsLoaded(usize),
    EpisodesLoaded { season: u32, count: usize },
    /// An episode list for a season that is no longer the requested one.
    StaleEpisodesDiscarded { season: u32 },
}

enum Completion {
    Metadata(ContentMetadata),
    Recommendations(Vec<RecommendationItem>),
    Seasons(Vec<SeasonSummary>),
    Episodes(EpisodeTicket, Vec<Episode>),
}

/// State for one identifier. Replaced wholesale on every `initialize`.
struct ActiveSession {
    identifier: ContentIdentifier,
    provider: Provider,
    /// `None` while loading.
    metadata: Option<ContentMetadata>,
    /// `None` while loading.
    recommendations: Option<Vec<RecommendationItem>>,
    /// Only present for series.
    navigator: Option<SeasonEpisodeNavigator>,
}

impl ActiveSession {
    fn playback(&self) -> PlaybackState {
        let (current_season, current_episode) = match &self.navigator {
            Some(nav) => (
                nav.current_season().unwrap_or(DEFAULT_SEASON),
                nav.current_episode(),
            ),
            None => (DEFAULT_SEASON, FIRST_EPISODE),
        };
        PlaybackState {
            provider: self.provider,
            current_season,
            current_episode,
        }
    }

    fn video_url(&self) -> String {
        let state = self.playback();
        state
            .provider
            .build_url(self.identifier, state.current_season, state.current_episode)
    }
}

enum SessionState {
    Uninitialized,
    NotFound(SessionError),
    Active(ActiveSession),
}

pub struct PlaybackSession {
    source: Arc<dyn MetadataSource>,
    resolver: ContentResolver,
    recommender: RecommendationFetcher,
    state: SessionState,
    pending: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl PlaybackSession {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            resolver: ContentResolver::new(source.clone()),
            recommender: RecommendationFetcher::new(source.clone()),
            source,
            state: SessionState::Uninitialized,
            pending: FuturesUnordered::new(),
        }
    }

    /// Start a fresh session for `identifier`.
    ///
    /// All prior state is dropped, including fetches still in flight, and
    /// the provider goes back to index 0. Metadata and recommendations are
    /// queued together; series also queue the season list.
    pub fn initialize(&mut self, identifier: ContentIdentifier) {
        self.pending = FuturesUnordered::new();

        let navigator = identifier.media_type.is_series().then(|| {
            let mut nav = SeasonEpisodeNavigator::new();
            nav.begin();
            nav
        });

        info!(%identifier, "initializing playback session");

        let resolver = self.resolver.clone();
        self.pending.push(
            async move { Completion::Metadata(resolver.resolve(identifier).await) }.boxed(),
        );

        let recommender = self.recommender.clone();
        self.pending.push(
            async move { Completion::Recommendations(recommender.fetch(identifier).await) }
                .boxed(),
        );

        if navigator.is_some() {
            let source = self.source.clone();
            self.pending.push(
                async move { Completion::Seasons(load_seasons(source, identifier.id).await) }
                    .boxed(),
            );
        }

        self.state = SessionState::Active(ActiveSession {
            identifier,
            provider: Provider::default(),
            metadata: None,
            recommendations: None,
            navigator,
        });
    }

    /// Start a session from a navigation query such as `type=tv&id=1399`.
    ///
    /// Without a usable identifier the session enters the terminal
    /// not-found state and no fetch is issued.
    pub fn initialize_from_query(&mut self, query: &str) -> Result<(), SessionError> {
        match ContentIdentifier::from_query(query) {
            Ok(identifier) => {
                self.initialize(identifier);
                Ok(())
            }
            Err(e) => {
                warn!(query, error = %e, "no usable content identifier");
                self.pending = FuturesUnordered::new();
                self.state = SessionState::NotFound(e.clone());
                Err(e)
            }
        }
    }

    /// Switch provider. Season, episode and pending fetches are untouched.
    pub fn set_provider(&mut self, provider: Provider) {
        if let SessionState::Active(active) = &mut self.state {
            debug!(provider = %provider, "provider changed");
            active.provider = provider;
        }
    }

    /// Change season and queue exactly one episode fetch for it.
    pub fn select_season(&mut self, season: u32) -> Result<(), SessionError> {
        let active = self.active_mut()?;
        let series_id = active.identifier.id;
        let nav = active.navigator.as_mut().ok_or(SessionError::NotASeries)?;
        let ticket = nav.select_season(season)?;

        debug!(series_id, season, seq = ticket.seq, "season selected");
        self.queue_episodes(series_id, ticket);
        Ok(())
    }

    pub fn select_episode(&mut self, episode: u32) -> Result<(), SessionError> {
        let nav = self
            .active_mut()?
            .navigator
            .as_mut()
            .ok_or(SessionError::NotASeries)?;
        nav.select_episode(episode);
        Ok(())
    }

    /// Navigate to the recommendation at `index`: a full re-initialization
    /// with its identifier. Returns the new identifier.
    pub fn select_recommendation(&mut self, index: usize) -> Option<ContentIdentifier> {
        let identifier = match &self.state {
            SessionState::Active(active) => active
                .recommendations
                .as_ref()?
                .get(index)?
                .identifier(),
            _ => return None,
        };
        self.initialize(identifier);
        Some(identifier)
    }

    /// Embed URL for the current state. `None` without an active session.
    pub fn current_video_url(&self) -> Option<String> {
        match &self.state {
            SessionState::Active(active) => Some(active.video_url()),
            _ => None,
        }
    }

    pub fn identifier(&self) -> Option<ContentIdentifier> {
        self.active().map(|a| a.identifier)
    }

    pub fn playback(&self) -> Option<PlaybackState> {
        self.active().map(ActiveSession::playback)
    }

    pub fn metadata(&self) -> Option<&ContentMetadata> {
        self.active()?.metadata.as_ref()
    }

    pub fn recommendations(&self) -> &[RecommendationItem] {
        self.active()
            .and_then(|a| a.recommendations.as_deref())
            .unwrap_or_default()
    }

    pub fn navigator(&self) -> Option<&SeasonEpisodeNavigator> {
        self.active()?.navigator.as_ref()
    }

    pub fn seasons(&self) -> &[SeasonSummary] {
        self.navigator().map(|n| n.seasons()).unwrap_or_default()
    }

    pub fn episodes(&self) -> &[Episode] {
        self.navigator().map(|n| n.episodes()).unwrap_or_default()
    }

    /// The terminal error when no usable identifier was supplied.
    pub fn not_found(&self) -> Option<&SessionError> {
        match &self.state {
            SessionState::NotFound(e) => Some(e),
            _ => None,
        }
    }

    /// Number of fetches still in flight.
    pub fn pending_fetches(&self) -> usize {
        self.pending.len()
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    /// Wait for the next fetch to complete and apply it.
    ///
    /// Returns `None` once nothing is in flight. A hung request keeps this
    /// pending indefinitely; callers that need a bound wrap it in a timeout.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        loop {
            let completion = self.pending.next().await?;
            if let Some(event) = self.apply(completion) {
                return Some(event);
            }
        }
    }

    /// Drive fetches until none are in flight, returning what happened.
    pub async fn settle(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    /// Snapshot of everything a renderer needs.
    pub fn view(&self) -> SessionView {
        match &self.state {
            SessionState::Uninitialized => SessionView::Uninitialized,
            SessionState::NotFound(e) => SessionView::NotFound {
                code: e.code(),
                message: e.to_string(),
            },
            SessionState::Active(active) => SessionView::Watching(Box::new(watch_view(active))),
        }
    }

    /// Pending futures are dropped on every state replacement, so a
    /// completion always belongs to the active session.
    fn apply(&mut self, completion: Completion) -> Option<SessionEvent> {
        let SessionState::Active(active) = &mut self.state else {
            return None;
        };

        let event = match completion {
            Completion::Metadata(metadata) => {
                active.metadata = Some(metadata);
                SessionEvent::MetadataResolved
            }
            Completion::Recommendations(items) => {
                let count = items.len();
                active.recommendations = Some(items);
                SessionEvent::RecommendationsLoaded(count)
            }
            Completion::Seasons(seasons) => {
                let count = seasons.len();
                let series_id = active.identifier.id;
                let ticket = active
                    .navigator
                    .as_mut()
                    .and_then(|nav| nav.seasons_loaded(seasons));
                if let Some(ticket) = ticket {
                    self.queue_episodes(series_id, ticket);
                }
                SessionEvent::SeasonsLoaded(count)
            }
            Completion::Episodes(ticket, episodes) => {
                let count = episodes.len();
                let landed = active
                    .navigator
                    .as_mut()
                    .is_some_and(|nav| nav.episodes_loaded(ticket, episodes));
                if landed {
                    SessionEvent::EpisodesLoaded {
                        season: ticket.season,
                        count,
                    }
                } else {
                    debug!(
                        season = ticket.season,
                        seq = ticket.seq,
                        "discarding stale episode list"
                    );
                    SessionEvent::StaleEpisodesDiscarded {
                        season: ticket.season,
                    }
                }
            }
        };
        Some(event)
    }

    fn queue_episodes(&mut self, series_id: u64, ticket: EpisodeTicket) {
        let source = self.source.clone();
        self.pending.push(
            async move {
                let episodes = load_episodes(source, series_id, ticket.season).await;
                Completion::Episodes(ticket, episodes)
            }
            .boxed(),
        );
    }

    fn active(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Active(active) => Some(active),
            _ => None,
        }
    }

    fn active_mut(&mut self) -> Result<&mut ActiveSession, SessionError> {
        match &mut self.state {
            SessionState::Active(active) => Ok(active),
            SessionState::NotFound(e) => Err(e.clone()),
            SessionState::Uninitialized => Err(SessionError::MissingIdentifier),
        }
    }
}

fn watch_view(active: &ActiveSession) -> WatchView {
    let playback = active.playback();
    let metadata = active.metadata.clone().unwrap_or_default();
    let nav = active.navigator.as_ref();

    WatchView {
        identifier: active.identifier,
        section: active.identifier.media_type.section_label(),
        title: metadata.title,
        overview: metadata.overview,
        provider: playback.provider,
        provider_name: playback.provider.name(),
        video_url: active.video_url(),
        badge: nav.map(|_| {
            format!(
                "S{} \u{2022} E{}",
                playback.current_season, playback.current_episode
            )
        }),
        season: nav.map(|_| playback.current_season),
        episode: nav.map(|_| playback.current_episode),
        phase: nav.map(SeasonEpisodeNavigator::phase),
        seasons: nav.map(|n| n.seasons().to_vec()).unwrap_or_default(),
        episodes: nav.map(|n| n.episodes().to_vec()).unwrap_or_default(),
        recommendations: active.recommendations.clone().unwrap_or_default(),
        loading: LoadingFlags {
            metadata: active.metadata.is_none(),
            recommendations: active.recommendations.is_none(),
            seasons: nav.is_some_and(|n| n.phase() == NavigatorPhase::LoadingSeasons),
            episodes: nav.is_some_and(|n| n.phase() == NavigatorPhase::LoadingEpisodes),
        },
    }
}

async fn load_seasons(source: Arc<dyn MetadataSource>, series_id: u64) -> Vec<SeasonSummary> {
    source.seasons(series_id).await.unwrap_or_else(|e| {
        warn!(series_id, error = %e, "failed to fetch seasons");
        Vec::new()
    })
}

async fn load_episodes(
    source: Arc<dyn MetadataSource>,
    series_id: u64,
    season: u32,
) -> Vec<Episode> {
    source
        .season_episodes(series_id, season)
        .await
        .unwrap_or_else(|e| {
            warn!(series_id, season, error = %e, "failed to fetch episodes");
            Vec::new()
        })
}
