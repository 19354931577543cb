//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://spotilove-2.onrender.com";

/// Runtime settings for the SpotiLove client.
///
/// Every field has a default so a partial `config.toml` is enough.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Single per-request timeout applied to every backend call.
    pub request_timeout_secs: u64,
    pub candidate_batch_size: u32,
    pub popular_artist_limit: u32,
    pub search_limit: u32,
    pub top_tracks_limit: u32,
    pub callback_scheme: String,
    pub callback_host: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 15,
            candidate_batch_size: 10,
            popular_artist_limit: 20,
            search_limit: 20,
            top_tracks_limit: 5,
            callback_scheme: "spotilove".to_string(),
            callback_host: "auth".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn callback_parser(&self) -> crate::auth::CallbackParser {
        crate::auth::CallbackParser::new(&self.callback_scheme, &self.callback_host)
    }
}
