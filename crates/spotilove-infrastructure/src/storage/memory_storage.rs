//! In-memory `SecureStorage` for ephemeral runs and tests.

use async_trait::async_trait;
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::session::SecureStorage;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemorySecureStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySecureStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> Result<R> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SpotiLoveError::storage("in-memory storage poisoned"))?;
        Ok(f(&mut entries))
    }
}

#[async_trait]
impl SecureStorage for InMemorySecureStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|e| e.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|e| {
            e.remove(key);
        })
    }
}
