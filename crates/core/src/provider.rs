//! Embed providers.
//!
//! The URL shapes are an external compatibility contract: each provider only
//! loads a playable embed for exactly these strings.

use serde::{Deserialize, Serialize};

use crate::types::ContentIdentifier;

/// The fixed, ordered set of embed providers. Index 0 is the session default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    VidsrcTo,
    VidsrcNet,
    Videasy,
    TwoEmbed,
    Vidlink,
    VidsrcXyz,
    VidsrcCc,
}

impl Provider {
    pub const ALL: [Provider; 7] = [
        Self::VidsrcTo,
        Self::VidsrcNet,
        Self::Videasy,
        Self::TwoEmbed,
        Self::Vidlink,
        Self::VidsrcXyz,
        Self::VidsrcCc,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name in the server selector.
    pub fn name(self) -> &'static str {
        match self {
            Self::VidsrcTo => "Server 1",
            Self::VidsrcNet => "Server 2",
            Self::Videasy => "Server 3",
            Self::TwoEmbed => "Server 4",
            Self::Vidlink => "Server 5",
            Self::VidsrcXyz => "Server 6",
            Self::VidsrcCc => "Server 7",
        }
    }

    /// Build the embed URL for `identifier`.
    ///
    /// `season` and `episode` are only rendered for series; movies get the
    /// bare content URL whatever values are passed.
    pub fn build_url(self, identifier: ContentIdentifier, season: u32, episode: u32) -> String {
        let mut url = self.content_url(identifier);
        if identifier.media_type.is_series() {
            url.push_str(&self.episode_suffix(season, episode));
        }
        url
    }

    fn content_url(self, identifier: ContentIdentifier) -> String {
        let kind = identifier.media_type.as_str();
        let id = identifier.id;
        match self {
            Self::VidsrcTo => format!("https://vidsrc.to/embed/{kind}/{id}/"),
            Self::VidsrcNet => format!("https://vidsrc.net/embed/{kind}/?tmdb={id}"),
            Self::Videasy => format!("https://player.videasy.net/{kind}/{id}"),
            Self::TwoEmbed => format!("https://www.2embed.cc/embed/{kind}/{id}"),
            Self::Vidlink => format!("https://vidlink.pro/embed/{kind}/{id}"),
            Self::VidsrcXyz => format!("https://vidsrc.xyz/embed/{kind}/{id}"),
            Self::VidsrcCc => format!("https://vidsrc.cc/v2/embed/{kind}/{id}"),
        }
    }

    fn episode_suffix(self, season: u32, episode: u32) -> String {
        match self {
            Self::VidsrcTo => format!("{season}-{episode}"),
            Self::VidsrcNet => format!("&season={season}&episode={episode}"),
            Self::Videasy
            | Self::TwoEmbed
            | Self::Vidlink
            | Self::VidsrcXyz
            | Self::VidsrcCc => format!("/{season}/{episode}"),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE: ContentIdentifier = ContentIdentifier {
        media_type: crate::MediaType::Movie,
        id: 550,
    };
    const SERIES: ContentIdentifier = ContentIdentifier {
        media_type: crate::MediaType::Series,
        id: 1399,
    };

    #[test]
    fn movie_urls_omit_season_and_episode() {
        let expected = [
            "https://vidsrc.to/embed/movie/550/",
            "https://vidsrc.net/embed/movie/?tmdb=550",
            "https://player.videasy.net/movie/550",
            "https://www.2embed.cc/embed/movie/550",
            "https://vidlink.pro/embed/movie/550",
            "https://vidsrc.xyz/embed/movie/550",
            "https://vidsrc.cc/v2/embed/movie/550",
        ];
        for (provider, want) in Provider::ALL.into_iter().zip(expected) {
            assert_eq!(provider.build_url(MOVIE, 3, 7), want, "{provider}");
        }
    }

    #[test]
    fn series_urls_carry_season_and_episode() {
        let expected = [
            "https://vidsrc.to/embed/tv/1399/2-5",
            "https://vidsrc.net/embed/tv/?tmdb=1399&season=2&episode=5",
            "https://player.videasy.net/tv/1399/2/5",
            "https://www.2embed.cc/embed/tv/1399/2/5",
            "https://vidlink.pro/embed/tv/1399/2/5",
            "https://vidsrc.xyz/embed/tv/1399/2/5",
            "https://vidsrc.cc/v2/embed/tv/1399/2/5",
        ];
        for (provider, want) in Provider::ALL.into_iter().zip(expected) {
            assert_eq!(provider.build_url(SERIES, 2, 5), want, "{provider}");
        }
    }

    #[test]
    fn movie_url_ignores_any_season_episode() {
        for provider in Provider::ALL {
            let base = provider.build_url(MOVIE, 1, 1);
            for (s, e) in [(0, 0), (4, 9), (12, 100)] {
                assert_eq!(provider.build_url(MOVIE, s, e), base);
            }
        }
    }

    #[test]
    fn documented_examples() {
        assert_eq!(
            Provider::VidsrcTo.build_url(MOVIE, 1, 1),
            "https://vidsrc.to/embed/movie/550/"
        );
        assert_eq!(
            Provider::from_index(2).unwrap().build_url(SERIES, 1, 1),
            "https://player.videasy.net/tv/1399/1/1"
        );
    }

    #[test]
    fn index_roundtrip_and_bounds() {
        for (i, provider) in Provider::ALL.into_iter().enumerate() {
            assert_eq!(provider.index(), i);
            assert_eq!(Provider::from_index(i), Some(provider));
            assert_eq!(provider.name(), format!("Server {}", i + 1));
        }
        assert_eq!(Provider::from_index(7), None);
        assert_eq!(Provider::default(), Provider::VidsrcTo);
    }
}
