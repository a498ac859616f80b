//! Season/episode navigation for series content.
//!
//! The navigator performs no I/O. Every transition that needs episodes hands
//! back an [`EpisodeTicket`]; the caller fetches and reports the result with
//! that ticket. Only the most recently issued ticket can land, so a slow
//! response for a season the user already left is dropped.

use serde::Serialize;
use vidwatch_core::{Episode, SeasonSummary, SessionError};

/// Season assumed before the season list arrives.
pub const DEFAULT_SEASON: u32 = 1;
pub const FIRST_EPISODE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigatorPhase {
    Idle,
    LoadingSeasons,
    SeasonsReady,
    LoadingEpisodes,
    EpisodesReady,
}

impl NavigatorPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::LoadingSeasons => "loading_seasons",
            Self::SeasonsReady => "seasons_ready",
            Self::LoadingEpisodes => "loading_episodes",
            Self::EpisodesReady => "episodes_ready",
        }
    }
}

impl std::fmt::Display for NavigatorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one issued episode fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeTicket {
    pub seq: u64,
    pub season: u32,
}

#[derive(Debug)]
pub struct SeasonEpisodeNavigator {
    phase: NavigatorPhase,
    seasons: Vec<SeasonSummary>,
    episodes: Vec<Episode>,
    current_season: Option<u32>,
    current_episode: u32,
    next_seq: u64,
    in_flight: Option<EpisodeTicket>,
}

impl Default for SeasonEpisodeNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeasonEpisodeNavigator {
    pub fn new() -> Self {
        Self {
            phase: NavigatorPhase::Idle,
            seasons: Vec::new(),
            episodes: Vec::new(),
            current_season: None,
            current_episode: FIRST_EPISODE,
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn phase(&self) -> NavigatorPhase {
        self.phase
    }

    pub fn seasons(&self) -> &[SeasonSummary] {
        &self.seasons
    }

    /// Episodes of the current season; empty while that season is loading.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// `None` until a season list with at least one season has landed.
    pub fn current_season(&self) -> Option<u32> {
        self.current_season
    }

    pub fn current_episode(&self) -> u32 {
        self.current_episode
    }

    pub fn is_loading_seasons(&self) -> bool {
        self.phase == NavigatorPhase::LoadingSeasons
    }

    pub fn is_loading_episodes(&self) -> bool {
        self.phase == NavigatorPhase::LoadingEpisodes
    }

    /// `Idle -> LoadingSeasons`. Discards anything from a previous run.
    pub fn begin(&mut self) {
        let next_seq = self.next_seq;
        *self = Self::new();
        self.next_seq = next_seq;
        self.phase = NavigatorPhase::LoadingSeasons;
    }

    /// Record the season list. A failed fetch is reported as an empty list.
    ///
    /// When the list is non-empty its first season becomes current and the
    /// returned ticket must be fetched.
    pub fn seasons_loaded(&mut self, seasons: Vec<SeasonSummary>) -> Option<EpisodeTicket> {
        if self.phase != NavigatorPhase::LoadingSeasons {
            return None;
        }

        self.seasons = seasons;
        match self.seasons.first().map(|s| s.number) {
            Some(first) => Some(self.request_season(first)),
            None => {
                self.phase = NavigatorPhase::SeasonsReady;
                None
            }
        }
    }

    /// User-driven season change. Always resets the episode to 1.
    pub fn select_season(&mut self, season: u32) -> Result<EpisodeTicket, SessionError> {
        if self.phase == NavigatorPhase::Idle {
            return Err(SessionError::NotASeries);
        }
        if !self.seasons.iter().any(|s| s.number == season) {
            return Err(SessionError::UnknownSeason(season));
        }
        Ok(self.request_season(season))
    }

    /// Any number is accepted; the episode list is not consulted.
    pub fn select_episode(&mut self, episode: u32) {
        self.current_episode = episode;
    }

    /// Land an episode list. Returns `false` when `ticket` was superseded
    /// and the list was discarded.
    pub fn episodes_loaded(&mut self, ticket: EpisodeTicket, episodes: Vec<Episode>) -> bool {
        if self.in_flight != Some(ticket) || self.current_season != Some(ticket.season) {
            return false;
        }

        self.in_flight = None;
        self.episodes = episodes;
        self.current_episode = FIRST_EPISODE;
        self.phase = NavigatorPhase::EpisodesReady;
        true
    }

    fn request_season(&mut self, season: u32) -> EpisodeTicket {
        let ticket = EpisodeTicket {
            seq: self.next_seq,
            season,
        };
        self.next_seq += 1;

        self.current_season = Some(season);
        self.current_episode = FIRST_EPISODE;
        self.episodes.clear();
        self.in_flight = Some(ticket);
        self.phase = NavigatorPhase::LoadingEpisodes;
        ticket
    }
}
