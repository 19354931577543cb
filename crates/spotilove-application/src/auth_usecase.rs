//! Sign-in, sign-up, sign-out and app-start resume.

use crate::bootstrap::{BootstrapOutcome, ProfileBootstrap};
use crate::in_flight::InFlight;
use spotilove_core::api::{AuthGrant, SpotiLoveApi};
use spotilove_core::error::Result;
use spotilove_core::session::{Session, SessionStore};
use spotilove_core::validation::{self, RegistrationForm};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuthUseCase {
    api: Arc<dyn SpotiLoveApi>,
    sessions: Arc<dyn SessionStore>,
    bootstrap: Arc<ProfileBootstrap>,
    in_flight: InFlight,
}

impl AuthUseCase {
    pub fn new(
        api: Arc<dyn SpotiLoveApi>,
        sessions: Arc<dyn SessionStore>,
        bootstrap: Arc<ProfileBootstrap>,
    ) -> Self {
        Self {
            api,
            sessions,
            bootstrap,
            in_flight: InFlight::new("Authentication"),
        }
    }

    /// URL to open in the browser for Spotify sign-in.
    pub fn oauth_login_url(&self) -> String {
        self.api.oauth_login_url()
    }

    /// Email/password sign-in. Validation failures never reach the network.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<BootstrapOutcome> {
        let request = validation::login_request(email, password, remember_me)?;
        let _guard = self.in_flight.begin()?;

        let grant = self.api.login(&request).await?;
        info!("Signed in as {}", grant.user.user_id);
        self.start_session(grant).await
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<BootstrapOutcome> {
        let request = form.validate()?;
        let _guard = self.in_flight.begin()?;

        let grant = self.api.register(&request).await?;
        info!("Registered user {}", grant.user.user_id);
        self.start_session(grant).await
    }

    /// Restores the stored session at app start.
    pub async fn resume(&self) -> Result<BootstrapOutcome> {
        match self.sessions.load().await {
            Some(session) => {
                info!("Resuming session for {}", session.user_id);
                self.bootstrap.run(session).await
            }
            None => Ok(BootstrapOutcome::signed_out()),
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.sessions.clear().await?;
        info!("Signed out");
        Ok(())
    }

    async fn start_session(&self, grant: AuthGrant) -> Result<BootstrapOutcome> {
        let mut session = Session::new(grant.user.user_id).with_token(grant.token);
        session.user_name = Some(grant.user.name).filter(|n| !n.is_empty());
        session.user_email = Some(grant.user.email).filter(|e| !e.is_empty());

        if let Err(e) = self.sessions.save(&session).await {
            warn!("Failed to persist session: {}", e);
            return Err(e);
        }
        self.bootstrap.run(session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        CountingSessionStore, RecordingPresenter, ScriptedApi, complete_profile,
    };
    use spotilove_core::SpotiLoveError;
    use spotilove_core::api::ApiError;
    use spotilove_core::auth::CallbackParser;
    use spotilove_core::navigation::{Navigation, Screen};
    use std::sync::atomic::Ordering;
    use uuid::Uuid;

    fn usecase(api: ScriptedApi, store: CountingSessionStore) -> (Arc<ScriptedApi>, Arc<CountingSessionStore>, AuthUseCase) {
        let api = Arc::new(api);
        let store = Arc::new(store);
        let bootstrap = Arc::new(ProfileBootstrap::new(
            api.clone(),
            store.clone(),
            Arc::new(RecordingPresenter::default()),
            CallbackParser::default(),
        ));
        let auth = AuthUseCase::new(api.clone(), store.clone(), bootstrap);
        (api, store, auth)
    }

    fn grant(id: Uuid) -> AuthGrant {
        AuthGrant {
            token: "tok".into(),
            user: complete_profile(id, "Dana"),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_never_calls_backend() {
        let (api, store, auth) = usecase(ScriptedApi::default(), CountingSessionStore::default());
        let err = auth.login("not-an-email", "secret", false).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.auth_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn test_login_saves_session_and_bootstraps() {
        let id = Uuid::new_v4();
        let api = ScriptedApi::with_profiles(vec![Ok(complete_profile(id, "Dana"))]);
        *api.auth_result.lock().unwrap() = Some(Ok(grant(id)));
        let (_, store, auth) = usecase(api, CountingSessionStore::default());

        let outcome = auth.login("dana@example.com", "secret", true).await.unwrap();

        let stored = store.current().unwrap();
        assert_eq!(stored.user_id, id);
        assert_eq!(stored.auth_token.as_deref(), Some("tok"));
        assert_eq!(stored.user_email.as_deref(), Some("dana@example.com"));
        assert_eq!(outcome.navigation(), Some(&Navigation::to(Screen::MainFeed)));
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_message() {
        let api = ScriptedApi::default();
        *api.auth_result.lock().unwrap() = Some(Err(ApiError::Rejected("Invalid credentials".into())));
        let (_, store, auth) = usecase(api, CountingSessionStore::default());

        let err = auth.login("dana@example.com", "wrong", false).await.unwrap_err();
        assert_eq!(err, SpotiLoveError::Rejected("Invalid credentials".into()));
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn test_register_validates_password_length() {
        let (api, _, auth) = usecase(ScriptedApi::default(), CountingSessionStore::default());
        let form = RegistrationForm {
            name: "Dana".into(),
            email: "dana@example.com".into(),
            password: "123".into(),
            age: "25".into(),
            gender: Some("Female".into()),
            ..Default::default()
        };
        assert!(auth.register(&form).await.unwrap_err().is_validation());
        assert_eq!(api.auth_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resume_without_session_goes_to_login() {
        let (api, _, auth) = usecase(ScriptedApi::default(), CountingSessionStore::default());
        let outcome = auth.resume().await.unwrap();
        assert_eq!(outcome.navigation(), Some(&Navigation::to(Screen::Login)));
        assert!(outcome.navigation().unwrap().notice.is_none());
        assert_eq!(api.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_resume_with_session_fetches_profile() {
        let id = Uuid::new_v4();
        let (api, _, auth) = usecase(
            ScriptedApi::with_profiles(vec![Ok(complete_profile(id, "Dana"))]),
            CountingSessionStore::holding(Session::new(id).with_token("tok")),
        );
        let outcome = auth.resume().await.unwrap();
        assert_eq!(outcome.session().map(|s| s.user_id), Some(id));
        assert_eq!(api.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (_, store, auth) = usecase(
            ScriptedApi::default(),
            CountingSessionStore::holding(Session::new(Uuid::new_v4())),
        );
        auth.logout().await.unwrap();
        assert_eq!(store.current(), None);
        assert_eq!(store.clears(), 1);
    }

    #[test]
    fn test_oauth_url_comes_from_backend() {
        let (_, _, auth) = usecase(ScriptedApi::default(), CountingSessionStore::default());
        assert_eq!(auth.oauth_login_url(), "https://backend.test/login");
    }
}
