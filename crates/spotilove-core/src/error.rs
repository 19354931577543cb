//! Error types for the SpotiLove client.

use thiserror::Error;

/// A shared error type for the SpotiLove client.
///
/// The first four variants form the user-facing taxonomy: each one maps to a
/// distinct recovery at the screen level (notify, log out, offer a retry,
/// highlight the form). The remaining variants cover local plumbing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpotiLoveError {
    /// Malformed deep link; the user is notified and no state changes.
    #[error("Invalid authentication callback: {0}")]
    InvalidCallback(String),

    /// The stored session no longer maps to a backend user.
    #[error("Session invalid: {0}")]
    SessionInvalid(String),

    /// Timeout or connectivity failure; the user may retry manually.
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side form input rejected before any network call.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The backend answered but refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Secure storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The same action is already in flight.
    #[error("{0} is already in progress")]
    Busy(&'static str),
}

impl SpotiLoveError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn invalid_callback(message: impl Into<String>) -> Self {
        Self::InvalidCallback(message.into())
    }

    pub fn session_invalid(message: impl Into<String>) -> Self {
        Self::SessionInvalid(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Validation error for the given form field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_invalid_callback(&self) -> bool {
        matches!(self, Self::InvalidCallback(_))
    }

    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::SessionInvalid(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SpotiLoveError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SpotiLoveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SpotiLoveError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SpotiLoveError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<crate::api::ApiError> for SpotiLoveError {
    fn from(err: crate::api::ApiError) -> Self {
        use crate::api::ApiError;

        match err {
            ApiError::Timeout | ApiError::Network(_) => Self::Network(err.to_string()),
            ApiError::Rejected(message) => Self::Rejected(message),
            ApiError::Status { .. } | ApiError::Malformed(_) => Self::Rejected(err.to_string()),
        }
    }
}

impl From<crate::api::ProfileFetchError> for SpotiLoveError {
    fn from(err: crate::api::ProfileFetchError) -> Self {
        if err.is_session_invalid() {
            Self::SessionInvalid(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A type alias for `Result<T, SpotiLoveError>`.
pub type Result<T> = std::result::Result<T, SpotiLoveError>;
