//! Composition root: wires config, storage, the HTTP client and use cases.

use anyhow::{Context, Result, bail};
use spotilove_application::{AuthUseCase, ProfileBootstrap};
use spotilove_core::api::SpotiLoveApi;
use spotilove_core::config::ClientConfig;
use spotilove_core::session::{SecureStorage, Session, SessionStore};
use spotilove_infrastructure::{
    ConfigService, FileSecureStorage, InMemorySecureStorage, SecureSessionStore, SpotiLovePaths,
};
use spotilove_interaction::SpotiLoveApiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::presenter::TerminalPresenter;

pub struct App {
    pub config: ClientConfig,
    pub api: Arc<dyn SpotiLoveApi>,
    pub sessions: Arc<dyn SessionStore>,
    pub presenter: Arc<TerminalPresenter>,
    pub bootstrap: Arc<ProfileBootstrap>,
    pub auth: AuthUseCase,
}

impl App {
    pub fn build(
        config_path: Option<PathBuf>,
        base_url: Option<String>,
        ephemeral: bool,
    ) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let mut config = service.load().context("Failed to load configuration")?;
        if let Some(base_url) = base_url {
            config.base_url = base_url;
        }
        debug!("Using backend {}", config.api_base());

        let storage: Arc<dyn SecureStorage> = if ephemeral {
            Arc::new(InMemorySecureStorage::new())
        } else {
            let path = SpotiLovePaths::session_file().context("No config directory for the session")?;
            Arc::new(FileSecureStorage::new(path))
        };
        let sessions: Arc<dyn SessionStore> = Arc::new(SecureSessionStore::new(storage));

        let api: Arc<dyn SpotiLoveApi> =
            Arc::new(SpotiLoveApiClient::new(&config).context("Failed to create HTTP client")?);
        let presenter = Arc::new(TerminalPresenter);
        let bootstrap = Arc::new(ProfileBootstrap::new(
            api.clone(),
            sessions.clone(),
            presenter.clone(),
            config.callback_parser(),
        ));
        let auth = AuthUseCase::new(api.clone(), sessions.clone(), bootstrap.clone());

        Ok(Self {
            config,
            api,
            sessions,
            presenter,
            bootstrap,
            auth,
        })
    }

    /// The stored session, or an error telling the user to sign in.
    pub async fn require_session(&self) -> Result<Session> {
        match self.sessions.load().await {
            Some(session) => Ok(session),
            None => bail!("Not signed in. Run `spotilove login` first."),
        }
    }
}
