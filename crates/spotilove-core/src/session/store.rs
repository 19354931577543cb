//! Session persistence traits.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// Key-value secure storage provided by the platform.
///
/// Values are opaque strings. Every call may fail (some runtimes refuse
/// keychain access outright); implementations report that as an error and
/// never panic.
#[async_trait]
pub trait SecureStorage: Send + Sync {
    /// Reads a value. `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, overwriting any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Owner of the persisted `Session`.
///
/// The store is the single writer of the session keys. Everything else
/// receives a `Session` value from the use case that loaded it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes every field of the session, overwriting prior values.
    ///
    /// Fields that are `None` are removed so a re-login never inherits a
    /// stale name or token.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Reconstructs the session from storage.
    ///
    /// Returns `None` when no session exists, when `user_id` is missing or
    /// not a UUID, or when storage could not be read.
    async fn load(&self) -> Option<Session>;

    /// Removes all four session keys.
    async fn clear(&self) -> Result<()>;
}
