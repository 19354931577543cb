//! Wire shapes of backend responses.
//!
//! The backend has answered with both camelCase and PascalCase field names
//! over time, so every field accepts both spellings. Lists sent as `null`
//! read as empty.

use serde::Deserialize;
use spotilove_core::music::{Artist, Track};
use spotilove_core::profile::{MusicProfile, Profile};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MusicProfileDto {
    #[serde(default, alias = "FavoriteArtists")]
    favorite_artists: Option<Vec<String>>,
    #[serde(default, alias = "FavoriteGenres")]
    favorite_genres: Option<Vec<String>>,
    #[serde(default, alias = "FavoriteSongs")]
    favorite_songs: Option<Vec<String>>,
}

impl From<MusicProfileDto> for MusicProfile {
    fn from(dto: MusicProfileDto) -> Self {
        Self {
            favorite_artists: dto.favorite_artists.unwrap_or_default(),
            favorite_genres: dto.favorite_genres.unwrap_or_default(),
            favorite_songs: dto.favorite_songs.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    #[serde(alias = "Id")]
    id: Uuid,
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(default, alias = "Email")]
    email: Option<String>,
    #[serde(default, alias = "Age")]
    age: Option<i32>,
    #[serde(default, alias = "Gender")]
    gender: Option<String>,
    #[serde(default, alias = "SexualOrientation")]
    sexual_orientation: Option<String>,
    #[serde(default, alias = "Bio")]
    bio: Option<String>,
    #[serde(default, alias = "Location")]
    location: Option<String>,
    #[serde(default, alias = "MusicProfile")]
    music_profile: Option<MusicProfileDto>,
    #[serde(default, alias = "Images")]
    images: Option<Vec<String>>,
}

impl From<UserDto> for Profile {
    fn from(dto: UserDto) -> Self {
        Self {
            user_id: dto.id,
            name: dto.name.unwrap_or_default(),
            email: dto.email.unwrap_or_default(),
            age: dto.age.unwrap_or(0),
            gender: dto.gender,
            sexual_orientation: dto.sexual_orientation,
            bio: dto.bio,
            location: dto.location,
            music_profile: dto.music_profile.map(Into::into),
            images: dto.images.unwrap_or_default(),
        }
    }
}

/// `GET /users/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileEnvelope {
    #[serde(default, alias = "User")]
    pub user: Option<UserDto>,
}

/// `POST /auth/login` and `POST /auth/register`
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    #[serde(default, alias = "Success")]
    pub success: bool,
    #[serde(default, alias = "Message")]
    pub message: Option<String>,
    #[serde(default, alias = "Token")]
    pub token: Option<String>,
    #[serde(default, alias = "User")]
    pub user: Option<UserDto>,
}

/// `GET /users?userId=&count=`
#[derive(Debug, Deserialize)]
pub(crate) struct CandidatesResponse {
    #[serde(default, alias = "Success")]
    pub success: bool,
    #[serde(default, alias = "Users")]
    pub users: Option<Vec<UserDto>>,
    #[serde(default, alias = "Message")]
    pub message: Option<String>,
}

/// `GET /matches/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct MatchesResponse {
    #[serde(default, alias = "Matches")]
    pub matches: Option<Vec<UserDto>>,
}

/// `POST /swipe`
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessResponse {
    #[serde(default, alias = "Success")]
    pub success: bool,
    #[serde(default, alias = "Message")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArtistDto {
    #[serde(alias = "Name")]
    name: String,
    #[serde(default, alias = "ImageUrl")]
    image_url: Option<String>,
}

impl From<ArtistDto> for Artist {
    fn from(dto: ArtistDto) -> Self {
        Self {
            name: dto.name,
            image_url: dto.image_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackDto {
    #[serde(alias = "Title")]
    title: String,
    #[serde(default, alias = "Artist")]
    artist: Option<String>,
    #[serde(default, alias = "PreviewUrl")]
    preview_url: Option<String>,
    #[serde(default, alias = "DeezerPreviewUrl")]
    deezer_preview_url: Option<String>,
    #[serde(default, alias = "SpotifyUri")]
    spotify_uri: Option<String>,
    #[serde(default, alias = "SpotifyUrl")]
    spotify_url: Option<String>,
}

impl TrackDto {
    /// Tracks without an artist field belong to the artist they were fetched for.
    pub(crate) fn into_track(self, requested_artist: &str) -> Track {
        Track {
            title: self.title,
            artist: self
                .artist
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| requested_artist.to_string()),
            preview_url: self.preview_url,
            deezer_preview_url: self.deezer_preview_url,
            spotify_uri: self.spotify_uri,
            spotify_url: self.spotify_url,
        }
    }
}
