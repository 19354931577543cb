//! Path management for SpotiLove configuration files.
//!
//! ```text
//! ~/.config/spotilove/
//! ├── config.toml     # Client configuration
//! └── session.toml    # Secure session entries (0600)
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for spotilove_core::SpotiLoveError {
    fn from(e: PathError) -> Self {
        spotilove_core::SpotiLoveError::config(e.to_string())
    }
}

pub struct SpotiLovePaths;

impl SpotiLovePaths {
    const APP_DIR: &'static str = "spotilove";

    /// `~/.config/spotilove` on Linux, the platform equivalent elsewhere.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Secure session entries. Written with mode 0600.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
