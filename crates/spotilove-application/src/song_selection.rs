//! Favourite song picker. Submitting it builds and saves the music profile.

use crate::presenter::Presenter;
use spotilove_core::api::{MusicProfileSubmission, SpotiLoveApi};
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::music::{self, PreviewSource, Track};
use spotilove_core::navigation::{Navigation, Notice, Screen};
use spotilove_core::validation::MIN_SONGS;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongChoice {
    pub track: Track,
    pub selected: bool,
}

pub struct SongSelection {
    api: Arc<dyn SpotiLoveApi>,
    presenter: Arc<dyn Presenter>,
    user_id: Uuid,
    artists: Vec<String>,
    tracks_per_artist: u32,
    songs: Vec<SongChoice>,
}

impl SongSelection {
    pub fn new(
        api: Arc<dyn SpotiLoveApi>,
        presenter: Arc<dyn Presenter>,
        user_id: Uuid,
        artists: Vec<String>,
        tracks_per_artist: u32,
    ) -> Self {
        Self {
            api,
            presenter,
            user_id,
            artists,
            tracks_per_artist,
            songs: Vec::new(),
        }
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn songs(&self) -> &[SongChoice] {
        &self.songs
    }

    /// Loads top tracks for every chosen artist in order.
    ///
    /// An artist whose lookup fails is skipped; the rest still load.
    pub async fn load_tracks(&mut self) -> &[SongChoice] {
        let mut songs = Vec::new();
        for artist in &self.artists {
            match self.api.artist_top_tracks(artist, self.tracks_per_artist).await {
                Ok(tracks) => {
                    debug!("{} tracks for {}", tracks.len(), artist);
                    songs.extend(tracks.into_iter().map(|track| SongChoice {
                        track,
                        selected: false,
                    }));
                }
                Err(e) => warn!("Top tracks for {} failed: {}", artist, e),
            }
        }
        self.songs = songs;
        &self.songs
    }

    /// Flips the pick state of the song with this title and artist.
    pub fn toggle(&mut self, title: &str, artist: &str) -> Option<bool> {
        let choice = self
            .songs
            .iter_mut()
            .find(|c| c.track.title == title && c.track.artist == artist)?;
        choice.selected = !choice.selected;
        Some(choice.selected)
    }

    pub fn selected(&self) -> impl Iterator<Item = &Track> {
        self.songs.iter().filter(|c| c.selected).map(|c| &c.track)
    }

    pub fn can_submit(&self) -> bool {
        self.selected().count() >= MIN_SONGS
    }

    pub fn preview(&self, index: usize) -> Option<PreviewSource> {
        self.songs.get(index).map(|c| c.track.preview_source())
    }

    /// Saves the music profile and moves on to the main feed.
    pub async fn submit(&self) -> Result<Navigation> {
        if !self.can_submit() {
            return Err(SpotiLoveError::validation(
                "songs",
                format!("Please select at least {} songs", MIN_SONGS),
            ));
        }

        let genres = match self.api.genres_from_artists(&self.artists).await {
            Ok(genres) => music::rank_genres(&genres),
            Err(e) => {
                warn!("Genre lookup failed, saving without genres: {}", e);
                Vec::new()
            }
        };
        let songs: Vec<String> = self.selected().map(Track::label).collect();

        let submission = MusicProfileSubmission {
            user_id: self.user_id,
            artists: music::join_list(&self.artists),
            songs: music::join_list(&songs),
            genres: music::join_list(&genres),
        };

        if let Err(e) = self.api.save_music_profile(self.user_id, &submission).await {
            warn!("Music profile save failed: {}", e);
            self.presenter.notify(Notice::error(
                "Error",
                format!("Failed to save music profile: {}", e),
            ));
            return Err(SpotiLoveError::from(e));
        }

        info!(
            "Music profile saved for {} ({} songs, {} genres)",
            self.user_id,
            songs.len(),
            genres.len()
        );
        Ok(Navigation::with_notice(
            Screen::MainFeed,
            Notice::info("Success", "Your music profile has been created automatically!"),
        ))
    }
}
