//! OAuth redirect parsing.
//!
//! After the browser-based Spotify authorization finishes, the backend
//! redirects to a custom-scheme link such as
//! `spotilove://auth?token=...&userId=...&isNewUser=true&name=Dana`.

use crate::error::{Result, SpotiLoveError};
use url::Url;
use uuid::Uuid;

/// Fields extracted from an auth callback link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCallback {
    pub token: String,
    pub user_id: Uuid,
    pub is_new_user: bool,
    /// Display-only; the authoritative name comes from the profile fetch.
    pub name: Option<String>,
}

/// Recognizes and parses auth callback links for one scheme/host pair.
#[derive(Debug, Clone)]
pub struct CallbackParser {
    scheme: String,
    host: String,
}

impl CallbackParser {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// True when the link targets the configured auth callback.
    pub fn accepts(&self, uri: &str) -> bool {
        match Url::parse(uri) {
            Ok(url) => {
                url.scheme().eq_ignore_ascii_case(&self.scheme)
                    && url
                        .host_str()
                        .is_some_and(|h| h.eq_ignore_ascii_case(&self.host))
            }
            Err(_) => false,
        }
    }

    /// Extracts the callback fields from the query string.
    ///
    /// `token` and `userId` are required and must be non-empty; `userId`
    /// must be a UUID. An absent or unparsable `isNewUser` reads as false.
    pub fn parse(&self, uri: &str) -> Result<AuthCallback> {
        let url = Url::parse(uri)
            .map_err(|e| SpotiLoveError::invalid_callback(format!("unparsable link: {}", e)))?;

        let mut token = None;
        let mut user_id = None;
        let mut is_new_user = None;
        let mut name = None;

        for (key, value) in url.query_pairs() {
            let slot = match &*key {
                "token" => &mut token,
                "userId" => &mut user_id,
                "isNewUser" => &mut is_new_user,
                "name" => &mut name,
                _ => continue,
            };
            // First occurrence wins.
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SpotiLoveError::invalid_callback("missing token"))?;
        let user_id_raw = user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SpotiLoveError::invalid_callback("missing userId"))?;
        let user_id = Uuid::parse_str(user_id_raw.trim()).map_err(|_| {
            SpotiLoveError::invalid_callback(format!("userId is not a UUID: {}", user_id_raw))
        })?;

        Ok(AuthCallback {
            token,
            user_id,
            is_new_user: is_new_user.as_deref().and_then(parse_bool).unwrap_or(false),
            name: name.filter(|n| !n.trim().is_empty()),
        })
    }
}

impl Default for CallbackParser {
    fn default() -> Self {
        Self::new("spotilove", "auth")
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
