//! Configuration loading.
//!
//! `ClientConfig` is read from `config.toml` (defaults when the file is
//! absent) and then overridden from the environment.

use crate::paths::SpotiLovePaths;
use spotilove_core::config::ClientConfig;
use spotilove_core::error::{Result, SpotiLoveError};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub const ENV_BASE_URL: &str = "SPOTILOVE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SPOTILOVE_TIMEOUT_SECS";

/// Loads the client configuration from a TOML file plus environment.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses `~/.config/spotilove/config.toml`.
    pub fn new() -> Self {
        Self {
            path: SpotiLovePaths::config_file().ok(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// File values, then process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Like `load`, reading overrides through `env`.
    pub fn load_with_env<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_file()?;

        if let Some(base_url) = env(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides base_url", ENV_BASE_URL);
            config.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = raw.trim().parse().map_err(|_| {
                SpotiLoveError::config(format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))
            })?;
        }

        if config.request_timeout_secs == 0 {
            return Err(SpotiLoveError::config("request_timeout_secs must be positive"));
        }
        Ok(config)
    }

    fn load_file(&self) -> Result<ClientConfig> {
        let Some(path) = self.path.as_ref().filter(|p| p.exists()) else {
            return Ok(ClientConfig::default());
        };

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
