//! Music catalog models and taste-profile helpers.

use serde::{Deserialize, Serialize};
use url::Url;

/// Image shown for artists the catalog has no picture for.
pub const PLACEHOLDER_ARTIST_IMAGE: &str = "https://via.placeholder.com/200";

/// Number of ranked genres kept in a submitted music profile.
const MAX_GENRES: usize = 5;
/// Below this many ranked genres the raw list is used instead.
const MIN_GENRES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub image_url: Option<String>,
}

impl Artist {
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_ARTIST_IMAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub preview_url: Option<String>,
    pub deezer_preview_url: Option<String>,
    pub spotify_uri: Option<String>,
    pub spotify_url: Option<String>,
}

impl Track {
    /// "Title by Artist", the form stored in the music profile.
    pub fn label(&self) -> String {
        format!("{} by {}", self.title, self.artist)
    }

    /// Picks where a preview should be played from.
    pub fn preview_source(&self) -> PreviewSource {
        if let Some(url) = non_empty(self.preview_url.as_deref()) {
            return PreviewSource::Spotify(url.to_string());
        }
        if let Some(url) = non_empty(self.deezer_preview_url.as_deref()) {
            return PreviewSource::Deezer(url.to_string());
        }
        PreviewSource::External {
            youtube_search: search_url(
                "https://www.youtube.com/results",
                Some("search_query"),
                &format!("{} {} official audio", self.title, self.artist),
            ),
            spotify_search: search_url(
                "https://open.spotify.com/search/",
                None,
                &format!("{} {}", self.title, self.artist),
            ),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn search_url(base: &str, param: Option<&str>, query: &str) -> String {
    match (Url::parse(base), param) {
        (Ok(mut url), Some(param)) => {
            url.query_pairs_mut().append_pair(param, query);
            url.to_string()
        }
        (Ok(mut url), None) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(query);
            }
            url.to_string()
        }
        (Err(_), _) => base.to_string(),
    }
}

/// Where a track preview can be heard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    Spotify(String),
    Deezer(String),
    /// No preview clip; offer these links to the browser instead.
    External {
        youtube_search: String,
        spotify_search: String,
    },
}

/// Ranks genres by case-insensitive frequency, most frequent first.
///
/// Ties keep first-seen order. At most five lower-cased genres are kept;
/// when fewer than three distinct genres exist the first three raw entries
/// are returned unchanged.
pub fn rank_genres(genres: &[String]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for genre in genres {
        let key = genre.to_lowercase();
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    // sort_by is stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let ranked: Vec<String> = counts.into_iter().take(MAX_GENRES).map(|(g, _)| g).collect();
    if ranked.len() < MIN_GENRES {
        genres.iter().take(MIN_GENRES).cloned().collect()
    } else {
        ranked
    }
}

/// Joins list entries the way the profile endpoint expects.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}
