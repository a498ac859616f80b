//! Playback-session orchestration: metadata, season/episode navigation,
//! recommendations and embed URL derivation for one content identifier.

pub mod navigator;
pub mod recommendations;
pub mod resolver;
pub mod session;
pub mod view;

pub use navigator::{NavigatorPhase, SeasonEpisodeNavigator};
pub use recommendations::{MAX_RECOMMENDATIONS, RecommendationFetcher};
pub use resolver::ContentResolver;
pub use session::{PlaybackSession, PlaybackState, SessionEvent};
pub use view::{LoadingFlags, SessionView, WatchView};
