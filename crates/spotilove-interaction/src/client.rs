//! SpotiLoveApiClient - REST client for the SpotiLove backend.
//!
//! One `reqwest::Client` is shared by every call and carries the single
//! configured timeout. Transport failures are classified into `ApiError`
//! so the use cases can tell a retryable timeout from a rejected request.

use crate::dto::{
    ArtistDto, AuthResponse, CandidatesResponse, MatchesResponse, ProfileEnvelope,
    SuccessResponse, TrackDto,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use spotilove_core::api::{
    ApiError, AuthGrant, BasicProfileUpdate, LoginRequest, MusicProfileSubmission,
    ProfileFetchError, RegisterRequest, SpotiLoveApi, SwipeDecision,
};
use spotilove_core::config::ClientConfig;
use spotilove_core::music::{Artist, Track};
use spotilove_core::profile::{Profile, SwipeCandidate};
use tracing::{debug, warn};
use uuid::Uuid;

/// HTTP implementation of [`SpotiLoveApi`].
#[derive(Clone)]
pub struct SpotiLoveApiClient {
    client: Client,
    base_url: String,
}

impl SpotiLoveApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and reads the whole body.
    async fn execute(&self, request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport)?;
        debug!("Backend answered {} ({} bytes)", status, body.len());
        Ok((status, body))
    }

    /// Sends the request, requiring a 2xx status.
    async fn execute_ok(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let (status, body) = self.execute(request).await?;
        if !status.is_success() {
            warn!("Backend returned {}: {}", status, truncate(&body));
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute_ok(request).await?;
        decode(&body)
    }

    /// Shared follow-up of login and registration.
    async fn authenticate(
        &self,
        request: RequestBuilder,
        default_message: &str,
    ) -> Result<AuthGrant, ApiError> {
        let (status, body) = self.execute(request).await?;

        // Failed logins usually carry `{success: false, message}` with a 4xx.
        let parsed = serde_json::from_str::<AuthResponse>(&body);
        let response = match (status.is_success(), parsed) {
            (true, Ok(response)) => response,
            (true, Err(e)) => return Err(ApiError::Malformed(e.to_string())),
            (false, Ok(response)) => {
                return Err(ApiError::Rejected(
                    response.message.unwrap_or_else(|| default_message.to_string()),
                ));
            }
            (false, Err(_)) => {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
        };

        if !response.success {
            return Err(ApiError::Rejected(
                response.message.unwrap_or_else(|| default_message.to_string()),
            ));
        }
        match (response.token.filter(|t| !t.is_empty()), response.user) {
            (Some(token), Some(user)) => Ok(AuthGrant {
                token,
                user: user.into(),
            }),
            _ => Err(ApiError::Malformed("auth response without token or user".into())),
        }
    }
}

fn map_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl SpotiLoveApi for SpotiLoveApiClient {
    fn oauth_login_url(&self) -> String {
        self.url("/login")
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthGrant, ApiError> {
        debug!("POST /auth/login");
        let builder = self.client.post(self.url("/auth/login")).json(request);
        self.authenticate(builder, "Login failed").await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant, ApiError> {
        debug!("POST /auth/register");
        let builder = self.client.post(self.url("/auth/register")).json(request);
        self.authenticate(builder, "Registration failed").await
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Profile, ProfileFetchError> {
        debug!("GET /users/{}", user_id);
        let builder = self.client.get(self.url(&format!("/users/{}", user_id)));
        let envelope: ProfileEnvelope = self.get_json(builder).await?;

        envelope
            .user
            .map(Into::into)
            .ok_or_else(|| ProfileFetchError::Malformed("response has no user".into()))
    }

    async fn update_basic_profile(
        &self,
        user_id: Uuid,
        update: &BasicProfileUpdate,
    ) -> Result<(), ApiError> {
        debug!("PUT /users/{}/basic-profile", user_id);
        let builder = self
            .client
            .put(self.url(&format!("/users/{}/basic-profile", user_id)))
            .json(update);
        self.execute_ok(builder).await.map(|_| ())
    }

    async fn save_music_profile(
        &self,
        user_id: Uuid,
        submission: &MusicProfileSubmission,
    ) -> Result<(), ApiError> {
        debug!("POST /users/{}/profile", user_id);
        let builder = self
            .client
            .post(self.url(&format!("/users/{}/profile", user_id)))
            .json(submission);
        self.execute_ok(builder).await.map(|_| ())
    }

    async fn fetch_candidates(
        &self,
        user_id: Uuid,
        count: u32,
    ) -> Result<Vec<SwipeCandidate>, ApiError> {
        debug!("GET /users?userId={}&count={}", user_id, count);
        let builder = self
            .client
            .get(self.url("/users"))
            .query(&[("userId", user_id.to_string()), ("count", count.to_string())]);
        let response: CandidatesResponse = self.get_json(builder).await?;

        if !response.success {
            debug!(
                "No candidates: {}",
                response.message.as_deref().unwrap_or("backend reported no success")
            );
            return Ok(Vec::new());
        }
        Ok(response
            .users
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn swipe(&self, decision: &SwipeDecision) -> Result<(), ApiError> {
        debug!("POST /swipe (like: {})", decision.is_like);
        let builder = self.client.post(self.url("/swipe")).json(decision);
        let response: SuccessResponse = self.get_json(builder).await?;

        if response.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Swipe was not recorded".to_string()),
            ))
        }
    }

    async fn fetch_matches(&self, user_id: Uuid) -> Result<Vec<Profile>, ApiError> {
        debug!("GET /matches/{}", user_id);
        let builder = self.client.get(self.url(&format!("/matches/{}", user_id)));
        let response: MatchesResponse = self.get_json(builder).await?;

        Ok(response
            .matches
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn popular_artists(&self, limit: u32) -> Result<Vec<Artist>, ApiError> {
        let builder = self
            .client
            .get(self.url("/spotify/popular-artists"))
            .query(&[("limit", limit)]);
        let artists: Option<Vec<ArtistDto>> = self.get_json(builder).await?;
        Ok(artists.unwrap_or_default().into_iter().map(Into::into).collect())
    }

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, ApiError> {
        let builder = self
            .client
            .get(self.url("/spotify/search-artists"))
            .query(&[("query", query.to_string()), ("limit", limit.to_string())]);
        let artists: Option<Vec<ArtistDto>> = self.get_json(builder).await?;
        Ok(artists.unwrap_or_default().into_iter().map(Into::into).collect())
    }

    async fn artist_top_tracks(
        &self,
        artist_name: &str,
        limit: u32,
    ) -> Result<Vec<Track>, ApiError> {
        let builder = self
            .client
            .get(self.url("/spotify/artist-top-tracks"))
            .query(&[("artistName", artist_name.to_string()), ("limit", limit.to_string())]);
        let tracks: Option<Vec<TrackDto>> = self.get_json(builder).await?;
        Ok(tracks
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.into_track(artist_name))
            .collect())
    }

    async fn genres_from_artists(&self, artists: &[String]) -> Result<Vec<String>, ApiError> {
        let builder = self
            .client
            .get(self.url("/spotify/genres-from-artists"))
            .query(&[("artists", artists.join(","))]);
        let genres: Option<Vec<String>> = self.get_json(builder).await?;
        Ok(genres.unwrap_or_default())
    }
}
