//! File-backed `SecureStorage`.
//!
//! Stands in for the platform keychain on desktop terminals. Values live in
//! a single TOML table written with owner-only permissions:
//!
//! ```toml
//! [entries]
//! auth_token = "..."
//! user_id = "6f1c2a9e-..."
//! ```

use super::atomic_toml::AtomicTomlFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::session::SecureStorage;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SecureEntries {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Secure storage persisted to a 0600 TOML file.
#[derive(Clone)]
pub struct FileSecureStorage {
    file: Arc<AtomicTomlFile<SecureEntries>>,
}

impl FileSecureStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path).owner_only()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn blocking<F, R>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&AtomicTomlFile<SecureEntries>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| SpotiLoveError::storage(format!("storage task failed: {}", e)))?
    }
}

#[async_trait]
impl SecureStorage for FileSecureStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            Ok(file
                .load()?
                .and_then(|mut stored| stored.entries.remove(&key)))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.blocking(move |file| {
            file.update(SecureEntries::default(), |stored| {
                stored.entries.insert(key, value);
            })?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            if !file.path().exists() {
                return Ok(());
            }
            file.update(SecureEntries::default(), |stored| {
                stored.entries.remove(&key);
            })?;
            Ok(())
        })
        .await
    }
}
