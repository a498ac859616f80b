use thiserror::Error;

/// Errors surfaced by a playback session.
///
/// Fetch failures are deliberately absent: every backend call degrades to a
/// fallback value inside the session and never reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No `type`/`id` pair was supplied. Terminal: render "not found".
    #[error("content identifier missing")]
    MissingIdentifier,

    #[error("invalid content identifier: {0}")]
    InvalidIdentifier(String),

    #[error("content is not a series")]
    NotASeries,

    #[error("season {0} is not in the season list")]
    UnknownSeason(u32),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingIdentifier => "missing_identifier",
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::NotASeries => "not_a_series",
            Self::UnknownSeason(_) => "unknown_season",
        }
    }

    /// Whether the session can only show the "content not found" screen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::MissingIdentifier | Self::InvalidIdentifier(_))
    }
}
