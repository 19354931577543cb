//! Favourite artist picker, the first half of music onboarding.

use crate::presenter::Presenter;
use spotilove_core::api::SpotiLoveApi;
use spotilove_core::config::ClientConfig;
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::music::Artist;
use spotilove_core::navigation::{Navigation, Notice, Screen};
use spotilove_core::validation::MIN_ARTISTS;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// An artist tile and whether it is currently picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistChoice {
    pub artist: Artist,
    pub selected: bool,
}

pub struct ArtistSelection {
    api: Arc<dyn SpotiLoveApi>,
    presenter: Arc<dyn Presenter>,
    user_id: Uuid,
    popular_limit: u32,
    search_limit: u32,
    shown: Vec<ArtistChoice>,
    /// Picked names in pick order; survives searches.
    selected: Vec<String>,
}

impl ArtistSelection {
    pub fn new(
        api: Arc<dyn SpotiLoveApi>,
        presenter: Arc<dyn Presenter>,
        user_id: Uuid,
        config: &ClientConfig,
    ) -> Self {
        Self {
            api,
            presenter,
            user_id,
            popular_limit: config.popular_artist_limit,
            search_limit: config.search_limit,
            shown: Vec::new(),
            selected: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[ArtistChoice] {
        &self.shown
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub async fn load_popular(&mut self) -> Result<&[ArtistChoice]> {
        let artists = self.api.popular_artists(self.popular_limit).await.map_err(|e| {
            warn!("Popular artists failed: {}", e);
            self.presenter
                .notify(Notice::error("Error", "Failed to load popular artists."));
            SpotiLoveError::from(e)
        })?;
        self.show(artists);
        Ok(&self.shown)
    }

    /// Searches the catalog. A blank query shows the popular list again.
    pub async fn search(&mut self, query: &str) -> Result<&[ArtistChoice]> {
        let query = query.trim();
        if query.is_empty() {
            return self.load_popular().await;
        }

        debug!("Searching artists for {:?}", query);
        let artists = self
            .api
            .search_artists(query, self.search_limit)
            .await
            .map_err(|e| {
                warn!("Artist search failed: {}", e);
                self.presenter
                    .notify(Notice::error("Error", format!("Search failed: {}", e)));
                SpotiLoveError::from(e)
            })?;
        self.show(artists);
        Ok(&self.shown)
    }

    /// Flips the pick state of an artist by name; returns the new state.
    pub fn toggle(&mut self, name: &str) -> bool {
        let now_selected = match self.selected.iter().position(|n| n == name) {
            Some(idx) => {
                self.selected.remove(idx);
                false
            }
            None => {
                self.selected.push(name.to_string());
                true
            }
        };
        for choice in self.shown.iter_mut().filter(|c| c.artist.name == name) {
            choice.selected = now_selected;
        }
        now_selected
    }

    pub fn can_continue(&self) -> bool {
        self.selected.len() >= MIN_ARTISTS
    }

    pub fn continue_to_songs(&self) -> Result<Navigation> {
        if !self.can_continue() {
            return Err(SpotiLoveError::validation(
                "artists",
                format!("Please select at least {} artists", MIN_ARTISTS),
            ));
        }
        Ok(Navigation::to(Screen::SongSelection {
            user_id: self.user_id,
            artists: self.selected.clone(),
        }))
    }

    fn show(&mut self, artists: Vec<Artist>) {
        self.shown = artists
            .into_iter()
            .map(|artist| ArtistChoice {
                selected: self.selected.contains(&artist.name),
                artist,
            })
            .collect();
    }
}
