//! Hand-written doubles shared by the use case tests.

use async_trait::async_trait;
use spotilove_core::api::{
    ApiError, AuthGrant, BasicProfileUpdate, LoginRequest, MusicProfileSubmission,
    ProfileFetchError, RegisterRequest, SpotiLoveApi, SwipeDecision,
};
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::music::{Artist, Track};
use spotilove_core::navigation::Notice;
use spotilove_core::profile::{MusicProfile, Profile};
use spotilove_core::session::{Session, SessionStore};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::presenter::Presenter;

pub fn complete_profile(id: Uuid, name: &str) -> Profile {
    let mut p = Profile::new(id, name, format!("{}@example.com", name.to_lowercase()));
    p.age = 27;
    p.gender = Some("Female".into());
    p.sexual_orientation = Some("Both".into());
    p.music_profile = Some(MusicProfile {
        favorite_artists: vec!["Radiohead".into()],
        favorite_genres: vec!["indie".into()],
        favorite_songs: vec!["Creep by Radiohead".into()],
    });
    p
}

pub fn candidate(name: &str) -> Profile {
    complete_profile(Uuid::new_v4(), name)
}

pub fn artist(name: &str) -> Artist {
    Artist {
        name: name.into(),
        image_url: None,
    }
}

pub fn track(title: &str, artist: &str) -> Track {
    Track {
        title: title.into(),
        artist: artist.into(),
        preview_url: None,
        deezer_preview_url: None,
        spotify_uri: None,
        spotify_url: None,
    }
}

/// Parks a scripted call until the test lets it go.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Backend double answering from per-operation scripts.
#[derive(Default)]
pub struct ScriptedApi {
    pub profile_results: Mutex<VecDeque<std::result::Result<Profile, ProfileFetchError>>>,
    pub profile_calls: AtomicUsize,
    pub auth_result: Mutex<Option<std::result::Result<AuthGrant, ApiError>>>,
    pub auth_calls: AtomicUsize,
    pub basic_result: Mutex<Option<ApiError>>,
    pub basic_updates: Mutex<Vec<BasicProfileUpdate>>,
    pub music_result: Mutex<Option<ApiError>>,
    pub music_submissions: Mutex<Vec<MusicProfileSubmission>>,
    pub candidate_batches: Mutex<VecDeque<std::result::Result<Vec<Profile>, ApiError>>>,
    pub candidate_calls: AtomicUsize,
    pub swipe_results: Mutex<VecDeque<std::result::Result<(), ApiError>>>,
    pub swipes: Mutex<Vec<SwipeDecision>>,
    pub matches: Mutex<Option<std::result::Result<Vec<Profile>, ApiError>>>,
    pub popular: Mutex<Vec<Artist>>,
    pub search_results: Mutex<HashMap<String, Vec<Artist>>>,
    pub searches: Mutex<Vec<String>>,
    pub top_tracks: Mutex<HashMap<String, std::result::Result<Vec<Track>, ApiError>>>,
    pub genres: Mutex<Option<std::result::Result<Vec<String>, ApiError>>>,
    /// When set, `fetch_profile` and `swipe` wait here before answering.
    pub gate: Option<Arc<Gate>>,
}

impl ScriptedApi {
    pub fn with_profiles(
        results: Vec<std::result::Result<Profile, ProfileFetchError>>,
    ) -> Self {
        let api = Self::default();
        *api.profile_results.lock().unwrap() = results.into();
        api
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    async fn wait_at_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
    }
}

#[async_trait]
impl SpotiLoveApi for ScriptedApi {
    fn oauth_login_url(&self) -> String {
        "https://backend.test/login".into()
    }

    async fn login(&self, _request: &LoginRequest) -> std::result::Result<AuthGrant, ApiError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        self.auth_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Rejected("Login failed".into())))
    }

    async fn register(&self, _request: &RegisterRequest) -> std::result::Result<AuthGrant, ApiError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        self.auth_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Rejected("Registration failed".into())))
    }

    async fn fetch_profile(&self, _user_id: Uuid) -> std::result::Result<Profile, ProfileFetchError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_at_gate().await;
        self.profile_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProfileFetchError::Network("script exhausted".into())))
    }

    async fn update_basic_profile(
        &self,
        _user_id: Uuid,
        update: &BasicProfileUpdate,
    ) -> std::result::Result<(), ApiError> {
        self.basic_updates.lock().unwrap().push(update.clone());
        match self.basic_result.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn save_music_profile(
        &self,
        _user_id: Uuid,
        submission: &MusicProfileSubmission,
    ) -> std::result::Result<(), ApiError> {
        self.music_submissions.lock().unwrap().push(submission.clone());
        match self.music_result.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn fetch_candidates(
        &self,
        _user_id: Uuid,
        _count: u32,
    ) -> std::result::Result<Vec<Profile>, ApiError> {
        self.candidate_calls.fetch_add(1, Ordering::SeqCst);
        self.candidate_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn swipe(&self, decision: &SwipeDecision) -> std::result::Result<(), ApiError> {
        self.wait_at_gate().await;
        self.swipes.lock().unwrap().push(*decision);
        self.swipe_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn fetch_matches(&self, _user_id: Uuid) -> std::result::Result<Vec<Profile>, ApiError> {
        self.matches.lock().unwrap().clone().unwrap_or(Ok(Vec::new()))
    }

    async fn popular_artists(&self, limit: u32) -> std::result::Result<Vec<Artist>, ApiError> {
        Ok(self
            .popular
            .lock()
            .unwrap()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn search_artists(
        &self,
        query: &str,
        _limit: u32,
    ) -> std::result::Result<Vec<Artist>, ApiError> {
        self.searches.lock().unwrap().push(query.to_string());
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn artist_top_tracks(
        &self,
        artist_name: &str,
        limit: u32,
    ) -> std::result::Result<Vec<Track>, ApiError> {
        self.top_tracks
            .lock()
            .unwrap()
            .get(artist_name)
            .cloned()
            .unwrap_or(Ok(Vec::new()))
            .map(|tracks| tracks.into_iter().take(limit as usize).collect())
    }

    async fn genres_from_artists(
        &self,
        _artists: &[String],
    ) -> std::result::Result<Vec<String>, ApiError> {
        self.genres.lock().unwrap().clone().unwrap_or(Ok(Vec::new()))
    }
}

/// Presenter that records notices and answers retries from a script.
#[derive(Default)]
pub struct RecordingPresenter {
    pub notices: Mutex<Vec<Notice>>,
    pub retry_answers: Mutex<VecDeque<bool>>,
    pub retry_prompts: AtomicUsize,
}

impl RecordingPresenter {
    pub fn answering(answers: &[bool]) -> Self {
        let presenter = Self::default();
        *presenter.retry_answers.lock().unwrap() = answers.iter().copied().collect();
        presenter
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn retry_prompts(&self) -> usize {
        self.retry_prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    async fn confirm_retry(&self, _title: &str, _message: &str) -> bool {
        self.retry_prompts.fetch_add(1, Ordering::SeqCst);
        self.retry_answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}

/// Session store that counts writes and clears.
#[derive(Default)]
pub struct CountingSessionStore {
    pub session: Mutex<Option<Session>>,
    pub saves: AtomicUsize,
    pub clears: AtomicUsize,
    pub fail_writes: bool,
}

impl CountingSessionStore {
    pub fn holding(session: Session) -> Self {
        let store = Self::default();
        *store.session.lock().unwrap() = Some(session);
        store
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for CountingSessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(SpotiLoveError::storage("keychain unavailable"));
        }
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        self.current()
    }

    async fn clear(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
