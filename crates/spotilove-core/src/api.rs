//! Backend API contract.
//!
//! Defines the operations the client consumes from the SpotiLove backend,
//! decoupling use cases from the HTTP transport.

use crate::music::{Artist, Track};
use crate::profile::{Profile, SwipeCandidate};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Transport-level failures of a backend call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established or was interrupted.
    #[error("network failure: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded into the expected shape.
    #[error("unexpected response body: {0}")]
    Malformed(String),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Timeouts and connectivity failures are worth a manual retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }
}

/// Outcome of `GET /users/{id}` beyond success.
///
/// `NotFound` and `Malformed` are kept apart for diagnostics but both mean
/// the stored session can no longer be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileFetchError {
    #[error("profile not found (status {status})")]
    NotFound { status: u16 },

    #[error("profile response unreadable: {0}")]
    Malformed(String),

    #[error("profile request timed out")]
    Timeout,

    #[error("profile request failed: {0}")]
    Network(String),
}

impl ProfileFetchError {
    /// True when the failure invalidates the session rather than the attempt.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Malformed(_))
    }

    pub fn is_transient(&self) -> bool {
        !self.is_session_invalid()
    }
}

impl From<ApiError> for ProfileFetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Timeout => Self::Timeout,
            ApiError::Network(message) => Self::Network(message),
            ApiError::Status { status, .. } => Self::NotFound { status },
            ApiError::Malformed(message) | ApiError::Rejected(message) => Self::Malformed(message),
        }
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    pub gender: String,
    pub sexual_orientation: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user: Profile,
}

/// `PUT /users/{id}/basic-profile` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicProfileUpdate {
    pub age: i32,
    pub gender: String,
    pub sexual_orientation: String,
    pub bio: Option<String>,
}

/// `POST /users/{id}/profile` body; lists are comma-joined on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicProfileSubmission {
    pub user_id: Uuid,
    pub artists: String,
    pub songs: String,
    pub genres: String,
}

/// `POST /swipe` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeDecision {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub is_like: bool,
}

/// The SpotiLove backend as seen by the client.
#[async_trait]
pub trait SpotiLoveApi: Send + Sync {
    /// URL to open in the system browser to start Spotify OAuth.
    fn oauth_login_url(&self) -> String;

    async fn login(&self, request: &LoginRequest) -> Result<AuthGrant, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant, ApiError>;

    /// Issues exactly one `GET /users/{id}`.
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Profile, ProfileFetchError>;

    async fn update_basic_profile(
        &self,
        user_id: Uuid,
        update: &BasicProfileUpdate,
    ) -> Result<(), ApiError>;

    async fn save_music_profile(
        &self,
        user_id: Uuid,
        submission: &MusicProfileSubmission,
    ) -> Result<(), ApiError>;

    /// Next batch of swipe candidates. Empty when the backend has none.
    async fn fetch_candidates(
        &self,
        user_id: Uuid,
        count: u32,
    ) -> Result<Vec<SwipeCandidate>, ApiError>;

    async fn swipe(&self, decision: &SwipeDecision) -> Result<(), ApiError>;

    async fn fetch_matches(&self, user_id: Uuid) -> Result<Vec<Profile>, ApiError>;

    async fn popular_artists(&self, limit: u32) -> Result<Vec<Artist>, ApiError>;

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, ApiError>;

    async fn artist_top_tracks(&self, artist_name: &str, limit: u32)
    -> Result<Vec<Track>, ApiError>;

    async fn genres_from_artists(&self, artists: &[String]) -> Result<Vec<String>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fetch_error_mapping() {
        assert_eq!(
            ProfileFetchError::from(ApiError::Status {
                status: 404,
                body: String::new()
            }),
            ProfileFetchError::NotFound { status: 404 }
        );
        assert!(ProfileFetchError::from(ApiError::Malformed("eof".into())).is_session_invalid());
        assert!(ProfileFetchError::from(ApiError::Timeout).is_transient());
        assert!(ProfileFetchError::from(ApiError::Network("reset".into())).is_transient());
    }

    #[test]
    fn test_swipe_decision_wire_names() {
        let decision = SwipeDecision {
            from_user_id: Uuid::nil(),
            to_user_id: Uuid::nil(),
            is_like: true,
        };
        let json = serde_json::to_value(decision).unwrap();
        assert_eq!(json["isLike"], true);
        assert!(json.get("fromUserId").is_some());
        assert!(json.get("toUserId").is_some());
    }

    #[test]
    fn test_login_request_wire_names() {
        let req = LoginRequest {
            email: "a@b.co".into(),
            password: "secret".into(),
            remember_me: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["rememberMe"], true);
    }
}
