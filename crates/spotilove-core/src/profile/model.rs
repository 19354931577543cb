//! Profile domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported music taste used by the backend matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicProfile {
    pub favorite_artists: Vec<String>,
    pub favorite_genres: Vec<String>,
    pub favorite_songs: Vec<String>,
}

impl MusicProfile {
    /// A music profile is empty when all three lists are empty.
    pub fn is_empty(&self) -> bool {
        self.favorite_artists.is_empty()
            && self.favorite_genres.is_empty()
            && self.favorite_songs.is_empty()
    }
}

/// A user's full profile as returned by the backend.
///
/// Fetched fresh on every bootstrap; only the `Session` subset is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    /// Zero means the user never filled in the basic profile.
    pub age: i32,
    pub gender: Option<String>,
    pub sexual_orientation: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub music_profile: Option<MusicProfile>,
    pub images: Vec<String>,
}

/// Candidates on the swipe feed share the profile shape.
pub type SwipeCandidate = Profile;

impl Profile {
    /// Creates a profile with only the identity fields set.
    pub fn new(user_id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            age: 0,
            gender: None,
            sexual_orientation: None,
            bio: None,
            location: None,
            music_profile: None,
            images: Vec::new(),
        }
    }

    /// Name for display, "Unknown User" when the backend sent none.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown User"
        } else {
            &self.name
        }
    }

    /// Card headline: the display name, plus ", {age}" once an age is known.
    pub fn card_title(&self) -> String {
        if self.age > 0 {
            format!("{}, {}", self.display_name(), self.age)
        } else {
            self.display_name().to_string()
        }
    }

    pub fn location_label(&self) -> &str {
        self.location
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("Location unknown")
    }

    /// Up to three non-blank genres, trimmed, for the card's tag row.
    pub fn genre_tags(&self) -> Vec<&str> {
        self.music_profile
            .as_ref()
            .map(|m| {
                m.favorite_genres
                    .iter()
                    .map(|g| g.trim())
                    .filter(|g| !g.is_empty())
                    .take(3)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }
}
