//! Session domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage keys for the four persisted session fields.
pub mod keys {
    pub const USER_ID: &str = "user_id";
    pub const USER_NAME: &str = "user_name";
    pub const USER_EMAIL: &str = "user_email";
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Every key a session may occupy, in write order.
    ///
    /// `USER_ID` goes last, and a save removes the old one before writing
    /// anything else, so a write interrupted half way leaves no id behind.
    /// `load` reads that as "no session".
    pub const ALL: [&str; 4] = [AUTH_TOKEN, USER_NAME, USER_EMAIL, USER_ID];
}

/// The signed-in user as remembered between launches.
///
/// Created on successful login or OAuth callback, replaced on re-login and
/// destroyed on logout or when the backend no longer knows the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub auth_token: Option<String>,
}

impl Session {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            user_name: None,
            user_email: None,
            auth_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// True when the session carries a non-empty bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Name shown in greetings, falling back to "User".
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("User")
    }
}
