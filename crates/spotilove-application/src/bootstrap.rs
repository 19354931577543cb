//! Profile bootstrap: from a stored or freshly received session to the
//! first onboarding screen.
//!
//! ```text
//! Start -> Fetching -> { BasicIncomplete | MusicIncomplete | Complete | Invalid }
//! ```
//!
//! The single manual retry after a transient failure is a second attempt
//! inside `Fetching`; no phase is entered twice per run.

use crate::in_flight::InFlight;
use crate::presenter::Presenter;
use spotilove_core::api::{ProfileFetchError, SpotiLoveApi};
use spotilove_core::auth::CallbackParser;
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::navigation::{Navigation, Notice, Screen, route};
use spotilove_core::profile::{Completeness, Profile, classify};
use spotilove_core::session::{Session, SessionStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How often the user may be asked to retry a transient failure.
///
/// Once the budget is spent, a further transient failure invalidates the
/// session. A budget of zero therefore expires it on the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_manual_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_manual_retries: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum BootstrapPhase {
    Start,
    Fetching,
    BasicIncomplete,
    MusicIncomplete,
    Complete,
    Invalid,
}

impl From<Completeness> for BootstrapPhase {
    fn from(c: Completeness) -> Self {
        match c {
            Completeness::BasicIncomplete => Self::BasicIncomplete,
            Completeness::MusicIncomplete => Self::MusicIncomplete,
            Completeness::Complete => Self::Complete,
        }
    }
}

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The profile was fetched and classified.
    Ready {
        session: Session,
        profile: Profile,
        navigation: Navigation,
    },
    /// No usable session; the user has to sign in.
    SignedOut { navigation: Navigation },
    /// A transient failure the user chose not to retry. Nothing changed.
    Deferred { error: SpotiLoveError },
}

impl BootstrapOutcome {
    /// Plain login screen, used when no session exists at all.
    pub fn signed_out() -> Self {
        Self::SignedOut {
            navigation: Navigation::to(Screen::Login),
        }
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            Self::Ready { navigation, .. } | Self::SignedOut { navigation } => Some(navigation),
            Self::Deferred { .. } => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Ready { session, .. } => Some(session),
            _ => None,
        }
    }

    /// The last phase reached.
    pub fn phase(&self) -> BootstrapPhase {
        match self {
            Self::Ready { profile, .. } => classify(profile).into(),
            Self::SignedOut { .. } => BootstrapPhase::Invalid,
            Self::Deferred { .. } => BootstrapPhase::Fetching,
        }
    }
}

/// Drives the Start -> Fetching -> terminal state machine.
pub struct ProfileBootstrap {
    api: Arc<dyn SpotiLoveApi>,
    sessions: Arc<dyn SessionStore>,
    presenter: Arc<dyn Presenter>,
    parser: CallbackParser,
    retry: RetryPolicy,
    in_flight: InFlight,
}

impl ProfileBootstrap {
    pub fn new(
        api: Arc<dyn SpotiLoveApi>,
        sessions: Arc<dyn SessionStore>,
        presenter: Arc<dyn Presenter>,
        parser: CallbackParser,
    ) -> Self {
        Self {
            api,
            sessions,
            presenter,
            parser,
            retry: RetryPolicy::default(),
            in_flight: InFlight::new("Sign-in"),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// True when the link is addressed to the auth callback.
    pub fn accepts(&self, uri: &str) -> bool {
        self.parser.accepts(uri)
    }

    /// Handles an OAuth redirect link.
    ///
    /// A malformed link raises an `InvalidCallback` notice and leaves the
    /// session store untouched.
    pub async fn handle_callback(&self, uri: &str) -> Result<BootstrapOutcome> {
        let _guard = self.in_flight.begin()?;

        let callback = match self.parser.parse(uri) {
            Ok(callback) => callback,
            Err(e) => {
                warn!("Rejected auth callback: {}", e);
                self.presenter.notify(Notice::InvalidCallback {
                    reason: reason_of(&e),
                });
                return Err(e);
            }
        };
        info!(
            "Auth callback for user {} (new user: {})",
            callback.user_id, callback.is_new_user
        );

        let mut session = Session::new(callback.user_id).with_token(callback.token);
        session.user_name = callback.name;
        if let Err(e) = self.sessions.save(&session).await {
            self.presenter
                .notify(Notice::error("Error", "Could not store your sign-in. Please try again."));
            return Err(e);
        }

        self.fetch_and_route(session).await
    }

    /// Runs the bootstrap for an already persisted session.
    pub async fn run(&self, session: Session) -> Result<BootstrapOutcome> {
        let _guard = self.in_flight.begin()?;
        self.fetch_and_route(session).await
    }

    async fn fetch_and_route(&self, session: Session) -> Result<BootstrapOutcome> {
        debug!("Bootstrap {} -> {}", BootstrapPhase::Start, BootstrapPhase::Fetching);

        let mut retries = 0;
        let profile = loop {
            match self.api.fetch_profile(session.user_id).await {
                Ok(profile) => break profile,
                Err(e) if e.is_session_invalid() => return self.expire(&e).await,
                Err(e) => {
                    warn!("Profile fetch failed (attempt {}): {}", retries + 1, e);
                    if retries >= self.retry.max_manual_retries {
                        return self.expire(&e).await;
                    }
                    let retry = self
                        .presenter
                        .confirm_retry("Connection problem", &retry_message(&e))
                        .await;
                    if !retry {
                        info!("Retry declined, keeping session");
                        return Ok(BootstrapOutcome::Deferred { error: e.into() });
                    }
                    retries += 1;
                }
            }
        };

        let completeness = classify(&profile);
        debug!(
            "Bootstrap {} -> {}",
            BootstrapPhase::Fetching,
            BootstrapPhase::from(completeness)
        );

        let session = self.refresh_identity(session, &profile).await;
        let navigation = route(completeness, &profile);
        info!("User {} routed to {}", profile.user_id, navigation.screen.as_ref());

        Ok(BootstrapOutcome::Ready {
            session,
            profile,
            navigation,
        })
    }

    /// Clears the session exactly once and sends the user back to login.
    async fn expire(&self, cause: &ProfileFetchError) -> Result<BootstrapOutcome> {
        warn!("Session invalid ({}), clearing", cause);
        debug!("Bootstrap {} -> {}", BootstrapPhase::Fetching, BootstrapPhase::Invalid);
        if let Err(e) = self.sessions.clear().await {
            warn!("Failed to clear session: {}", e);
        }
        Ok(BootstrapOutcome::SignedOut {
            navigation: Navigation::session_expired(),
        })
    }

    /// Stores the authoritative name and email from the profile.
    async fn refresh_identity(&self, mut session: Session, profile: &Profile) -> Session {
        let name = Some(profile.name.clone()).filter(|n| !n.is_empty());
        let email = Some(profile.email.clone()).filter(|e| !e.is_empty());
        if session.user_name == name && session.user_email == email {
            return session;
        }

        session.user_name = name.or(session.user_name);
        session.user_email = email.or(session.user_email);
        if let Err(e) = self.sessions.save(&session).await {
            warn!("Failed to update stored profile identity: {}", e);
        }
        session
    }
}

fn reason_of(err: &SpotiLoveError) -> String {
    match err {
        SpotiLoveError::InvalidCallback(reason) => reason.clone(),
        other => other.to_string(),
    }
}

fn retry_message(err: &ProfileFetchError) -> String {
    match err {
        ProfileFetchError::Timeout => {
            "The server took too long to respond. Try again?".to_string()
        }
        other => format!("Could not reach SpotiLove ({}). Try again?", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        CountingSessionStore, Gate, RecordingPresenter, ScriptedApi, complete_profile,
    };
    use spotilove_core::profile::MusicProfile;
    use uuid::Uuid;

    const USER: &str = "6f1c2a9e-3b47-4d5e-9a21-7c8b0e4f1d23";

    struct Fixture {
        api: Arc<ScriptedApi>,
        store: Arc<CountingSessionStore>,
        presenter: Arc<RecordingPresenter>,
        bootstrap: ProfileBootstrap,
    }

    fn fixture(api: ScriptedApi, store: CountingSessionStore, presenter: RecordingPresenter) -> Fixture {
        let api = Arc::new(api);
        let store = Arc::new(store);
        let presenter = Arc::new(presenter);
        let bootstrap = ProfileBootstrap::new(
            api.clone(),
            store.clone(),
            presenter.clone(),
            CallbackParser::default(),
        );
        Fixture {
            api,
            store,
            presenter,
            bootstrap,
        }
    }

    fn user_id() -> Uuid {
        Uuid::parse_str(USER).unwrap()
    }

    fn callback_uri() -> String {
        format!("spotilove://auth?token=tok&userId={}&isNewUser=true&name=Dana", USER)
    }

    fn stored_session() -> Session {
        Session::new(user_id())
            .with_token("tok")
            .with_name("Dana")
            .with_email("dana@example.com")
    }

    #[tokio::test]
    async fn test_callback_missing_token_writes_nothing() {
        let f = fixture(ScriptedApi::default(), CountingSessionStore::default(), RecordingPresenter::default());
        let uri = format!("spotilove://auth?userId={}", USER);

        let err = f.bootstrap.handle_callback(&uri).await.unwrap_err();

        assert!(err.is_invalid_callback());
        assert_eq!(f.store.saves(), 0);
        assert_eq!(f.api.profile_calls(), 0);
        assert!(matches!(
            f.presenter.notices().as_slice(),
            [Notice::InvalidCallback { .. }]
        ));
    }

    #[tokio::test]
    async fn test_callback_missing_user_id_writes_nothing() {
        let f = fixture(ScriptedApi::default(), CountingSessionStore::default(), RecordingPresenter::default());
        let err = f
            .bootstrap
            .handle_callback("spotilove://auth?token=tok")
            .await
            .unwrap_err();
        assert!(err.is_invalid_callback());
        assert_eq!(f.store.saves(), 0);
        assert_eq!(f.store.current(), None);
    }

    #[tokio::test]
    async fn test_valid_callback_persists_user_id_and_routes() {
        let mut profile = complete_profile(user_id(), "Dana");
        profile.age = 0;
        let f = fixture(
            ScriptedApi::with_profiles(vec![Ok(profile)]),
            CountingSessionStore::default(),
            RecordingPresenter::default(),
        );

        let outcome = f.bootstrap.handle_callback(&callback_uri()).await.unwrap();

        let stored = f.store.current().unwrap();
        assert_eq!(stored.user_id, user_id());
        assert_eq!(stored.auth_token.as_deref(), Some("tok"));
        assert_eq!(outcome.phase(), BootstrapPhase::BasicIncomplete);
        assert_eq!(
            outcome.navigation().unwrap().screen,
            Screen::CompleteProfile {
                user_id: user_id(),
                display_name: "Dana".into()
            }
        );
        assert_eq!(f.api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_music_incomplete_routes_to_artist_selection() {
        let mut profile = complete_profile(user_id(), "Dana");
        profile.music_profile = Some(MusicProfile::default());
        let f = fixture(
            ScriptedApi::with_profiles(vec![Ok(profile)]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::default(),
        );

        let outcome = f.bootstrap.run(stored_session()).await.unwrap();
        let nav = outcome.navigation().unwrap();
        assert_eq!(nav.screen, Screen::ArtistSelection { user_id: user_id() });
        assert!(matches!(nav.notice, Some(Notice::MusicSetupPrompt { .. })));
    }

    #[tokio::test]
    async fn test_complete_profile_goes_to_feed_without_notice() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![Ok(complete_profile(user_id(), "Dana"))]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::default(),
        );

        let outcome = f.bootstrap.run(stored_session()).await.unwrap();
        assert_eq!(outcome.navigation(), Some(&Navigation::to(Screen::MainFeed)));
        assert!(f.presenter.notices().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_clears_session_exactly_once() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![Err(ProfileFetchError::NotFound { status: 404 })]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::default(),
        );

        let outcome = f.bootstrap.run(stored_session()).await.unwrap();

        assert_eq!(f.store.clears(), 1);
        assert_eq!(f.store.current(), None);
        assert_eq!(outcome.phase(), BootstrapPhase::Invalid);
        assert_eq!(outcome.navigation(), Some(&Navigation::session_expired()));
        assert_eq!(f.presenter.retry_prompts(), 0);
    }

    #[tokio::test]
    async fn test_malformed_is_treated_like_not_found() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![Err(ProfileFetchError::Malformed("eof".into()))]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::default(),
        );
        let outcome = f.bootstrap.run(stored_session()).await.unwrap();
        assert_eq!(f.store.clears(), 1);
        assert_eq!(outcome.navigation(), Some(&Navigation::session_expired()));
    }

    #[tokio::test]
    async fn test_timeout_then_declined_retry_keeps_session() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![Err(ProfileFetchError::Timeout)]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::answering(&[false]),
        );

        let outcome = f.bootstrap.run(stored_session()).await.unwrap();

        assert!(matches!(outcome, BootstrapOutcome::Deferred { ref error } if error.is_network()));
        assert_eq!(f.store.clears(), 0);
        assert_eq!(f.store.saves(), 0);
        assert_eq!(f.store.current(), Some(stored_session()));
        assert_eq!(f.api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_accepted_retry_fetches_again_with_same_user() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![
                Err(ProfileFetchError::Network("reset".into())),
                Ok(complete_profile(user_id(), "Dana")),
            ]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::answering(&[true]),
        );

        let outcome = f.bootstrap.run(stored_session()).await.unwrap();
        assert_eq!(outcome.phase(), BootstrapPhase::Complete);
        assert_eq!(f.api.profile_calls(), 2);
        assert_eq!(f.presenter.retry_prompts(), 1);
    }

    #[tokio::test]
    async fn test_second_transient_failure_expires_session_once() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![
                Err(ProfileFetchError::Timeout),
                Err(ProfileFetchError::Timeout),
            ]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::answering(&[true, true]),
        );

        let outcome = f.bootstrap.run(stored_session()).await.unwrap();

        assert_eq!(f.presenter.retry_prompts(), 1);
        assert_eq!(f.api.profile_calls(), 2);
        assert_eq!(f.store.clears(), 1);
        assert_eq!(outcome.phase(), BootstrapPhase::Invalid);
    }

    #[tokio::test]
    async fn test_zero_retry_budget_expires_on_first_failure() {
        let f = fixture(
            ScriptedApi::with_profiles(vec![Err(ProfileFetchError::Timeout)]),
            CountingSessionStore::holding(stored_session()),
            RecordingPresenter::answering(&[true]),
        );
        let bootstrap = f.bootstrap.with_retry_policy(RetryPolicy {
            max_manual_retries: 0,
        });

        let outcome = bootstrap.run(stored_session()).await.unwrap();
        assert_eq!(outcome.navigation(), Some(&Navigation::session_expired()));
        assert_eq!(f.presenter.retry_prompts(), 0);
        assert_eq!(f.store.clears(), 1);
        assert_eq!(f.api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_callback_is_busy() {
        let gate = Arc::new(Gate::default());
        let f = fixture(
            ScriptedApi::with_profiles(vec![Ok(complete_profile(user_id(), "Dana"))])
                .gated(gate.clone()),
            CountingSessionStore::default(),
            RecordingPresenter::default(),
        );
        let other_uri = format!(
            "spotilove://auth?token=other&userId={}",
            Uuid::new_v4()
        );

        let first_uri = callback_uri();
        let (first, second) = tokio::join!(f.bootstrap.handle_callback(&first_uri), async {
            gate.entered.notified().await;
            let before = (f.store.saves(), f.store.current());
            let second = f.bootstrap.handle_callback(&other_uri).await;
            assert_eq!((f.store.saves(), f.store.current()), before);
            gate.release.notify_one();
            second
        });

        assert!(second.unwrap_err().is_busy());
        assert!(matches!(first.unwrap(), BootstrapOutcome::Ready { .. }));
        assert_eq!(f.store.current().unwrap().auth_token.as_deref(), Some("tok"));
        assert_eq!(f.api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_profile_identity_refreshes_stored_session() {
        let profile = complete_profile(user_id(), "Dana Katz");
        let f = fixture(
            ScriptedApi::with_profiles(vec![Ok(profile)]),
            CountingSessionStore::default(),
            RecordingPresenter::default(),
        );

        let outcome = f.bootstrap.handle_callback(&callback_uri()).await.unwrap();

        let stored = f.store.current().unwrap();
        assert_eq!(stored.user_name.as_deref(), Some("Dana Katz"));
        assert_eq!(stored.user_email.as_deref(), Some("dana katz@example.com"));
        assert_eq!(outcome.session(), Some(&stored));
    }

    #[tokio::test]
    async fn test_storage_failure_on_callback_is_reported() {
        let store = CountingSessionStore {
            fail_writes: true,
            ..Default::default()
        };
        let f = fixture(ScriptedApi::default(), store, RecordingPresenter::default());

        let err = f.bootstrap.handle_callback(&callback_uri()).await.unwrap_err();
        assert!(matches!(err, SpotiLoveError::Storage(_)));
        assert_eq!(f.api.profile_calls(), 0);
        assert!(f.presenter.notices()[0].is_error());
    }
}
