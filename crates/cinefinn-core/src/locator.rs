use cinefinn_api::types::{Lang, Series};

use crate::selection::Target;

/// Opaque playback-source descriptor handed to the media surface.
///
/// The renderer re-derives the locator on every selection change and
/// compares addresses to decide whether the source actually changed, so
/// identical inputs must always yield an identical address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub address: String,
    pub metadata: LocatorMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorMetadata {
    pub title: String,
    pub artist: String,
    pub artwork: String,
}

const ARTIST: &str = "CineFinn";

/// Build the playback locator for the current selection. Pure and
/// deterministic; the token rides along as a query credential.
pub fn build_locator(
    series: &Series,
    target: Target,
    language: Lang,
    auth_token: &str,
    api_url: &str,
) -> Locator {
    let base = api_url.trim_end_matches('/');
    let mut address = format!("{base}/video?auth-token={auth_token}&series={}", series.id);

    let title = match target {
        Target::Movie(index) => {
            address.push_str(&format!("&movie={index}"));
            format!("{} - Movie {index}", series.title)
        }
        Target::Episode { season, episode } => {
            address.push_str(&format!("&season={season}&episode={episode}"));
            format!("{} - Season {season}, Episode {episode}", series.title)
        }
    };
    address.push_str(&format!("&language={language}"));

    let artwork = format!(
        "{base}/images/{}/cover.jpg?auth-token={auth_token}",
        series.id
    );

    Locator {
        address,
        metadata: LocatorMetadata {
            title,
            artist: ARTIST.into(),
            artwork,
        },
    }
}
