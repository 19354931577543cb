//! Screen routing and user-visible notices.
//!
//! Front ends own rendering; the core only decides which screen comes next
//! and what the user should be told on the way.

use crate::profile::{Completeness, Profile};
use serde::Serialize;
use uuid::Uuid;

/// Destinations the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, strum::AsRefStr)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Login,
    CompleteProfile { user_id: Uuid, display_name: String },
    ArtistSelection { user_id: Uuid },
    SongSelection { user_id: Uuid, artists: Vec<String> },
    MainFeed,
}

/// Messages surfaced to the user, typically as a dialog or toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// First-time or incomplete user arriving at profile completion.
    Welcome { name: String },
    /// Basic profile done; music taste still missing.
    MusicSetupPrompt { name: String },
    /// The stored session was rejected; the user must sign in again.
    SessionExpired,
    /// The auth callback link could not be used.
    InvalidCallback { reason: String },
    Info { title: String, message: String },
    Error { title: String, message: String },
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Info {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Welcome { .. } => "Welcome to SpotiLove!",
            Self::MusicSetupPrompt { .. } => "Almost there",
            Self::SessionExpired => "Session expired",
            Self::InvalidCallback { .. } => "Error",
            Self::Info { title, .. } | Self::Error { title, .. } => title,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Welcome { name } => format!("Hi {}! Let's set up your profile.", name),
            Self::MusicSetupPrompt { name } => {
                format!("Hi {}! Pick a few artists so we can learn your taste.", name)
            }
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Self::InvalidCallback { reason } => {
                format!("Invalid authentication response ({})", reason)
            }
            Self::Info { message, .. } | Self::Error { message, .. } => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Error { .. } | Self::SessionExpired | Self::InvalidCallback { .. }
        )
    }
}

/// A routing decision: where to go and what to say first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub screen: Screen,
    pub notice: Option<Notice>,
}

impl Navigation {
    pub fn to(screen: Screen) -> Self {
        Self {
            screen,
            notice: None,
        }
    }

    pub fn with_notice(screen: Screen, notice: Notice) -> Self {
        Self {
            screen,
            notice: Some(notice),
        }
    }

    /// Back to login after the session was rejected.
    pub fn session_expired() -> Self {
        Self::with_notice(Screen::Login, Notice::SessionExpired)
    }
}

/// Maps a classified profile to its onboarding destination.
///
/// A complete profile goes straight to the feed; the other two states get
/// an explanatory notice before their setup screen.
pub fn route(completeness: Completeness, profile: &Profile) -> Navigation {
    let name = profile.display_name().to_string();
    match completeness {
        Completeness::BasicIncomplete => Navigation::with_notice(
            Screen::CompleteProfile {
                user_id: profile.user_id,
                display_name: name.clone(),
            },
            Notice::Welcome { name },
        ),
        Completeness::MusicIncomplete => Navigation::with_notice(
            Screen::ArtistSelection {
                user_id: profile.user_id,
            },
            Notice::MusicSetupPrompt { name },
        ),
        Completeness::Complete => Navigation::to(Screen::MainFeed),
    }
}
