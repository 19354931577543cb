//! `SessionStore` over any `SecureStorage`.

use async_trait::async_trait;
use spotilove_core::error::Result;
use spotilove_core::session::{SecureStorage, Session, SessionStore, keys};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Persists the four session fields as individual secure-storage entries.
pub struct SecureSessionStore {
    storage: Arc<dyn SecureStorage>,
}

impl SecureSessionStore {
    pub fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self { storage }
    }

    async fn write(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.storage.set(key, value).await,
            None => self.storage.remove(key).await,
        }
    }

    /// Optional fields degrade to `None` on read failure.
    async fn read_optional(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read session key {}: {}", key, e);
                None
            }
        }
    }
}

#[async_trait]
impl SessionStore for SecureSessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        // Drop the previous owner's id first; an interrupted save then reads
        // back as no session instead of the old id with the new token.
        self.storage.remove(keys::USER_ID).await?;

        let user_id = session.user_id.to_string();
        for key in keys::ALL {
            let value = match key {
                keys::AUTH_TOKEN => session.auth_token.as_deref(),
                keys::USER_NAME => session.user_name.as_deref(),
                keys::USER_EMAIL => session.user_email.as_deref(),
                _ => Some(user_id.as_str()),
            };
            self.write(key, value).await?;
        }
        debug!("Session saved for user {}", session.user_id);
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        let raw_id = match self.storage.get(keys::USER_ID).await {
            Ok(Some(id)) => id,
            Ok(None) => return None,
            Err(e) => {
                warn!("Secure storage unavailable, treating as logged out: {}", e);
                return None;
            }
        };

        let Ok(user_id) = Uuid::parse_str(raw_id.trim()) else {
            warn!("Stored user id is not a UUID, ignoring session");
            return None;
        };

        Some(Session {
            user_id,
            user_name: self.read_optional(keys::USER_NAME).await,
            user_email: self.read_optional(keys::USER_EMAIL).await,
            auth_token: self.read_optional(keys::AUTH_TOKEN).await,
        })
    }

    async fn clear(&self) -> Result<()> {
        let mut first_error = None;
        for key in keys::ALL {
            if let Err(e) = self.storage.remove(key).await {
                warn!("Failed to remove session key {}: {}", key, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                debug!("Session cleared");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileSecureStorage, InMemorySecureStorage};
    use spotilove_core::SpotiLoveError;
    use tempfile::TempDir;

    /// Storage whose every call fails, like a keychain the runtime refuses.
    struct BrokenStorage;

    #[async_trait]
    impl SecureStorage for BrokenStorage {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(SpotiLoveError::storage("keychain unavailable"))
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(SpotiLoveError::storage("keychain unavailable"))
        }
        async fn remove(&self, _key: &str) -> Result<()> {
            Err(SpotiLoveError::storage("keychain unavailable"))
        }
    }

    /// In-memory storage whose writes start failing after a budget.
    struct FlakyStorage {
        inner: InMemorySecureStorage,
        writes_left: std::sync::Mutex<usize>,
    }

    impl FlakyStorage {
        fn failing_after(writes: usize) -> Self {
            Self {
                inner: InMemorySecureStorage::new(),
                writes_left: std::sync::Mutex::new(writes),
            }
        }

        fn spend_write(&self) -> Result<()> {
            let mut left = self.writes_left.lock().unwrap();
            if *left == 0 {
                return Err(SpotiLoveError::storage("disk full"));
            }
            *left -= 1;
            Ok(())
        }
    }

    #[async_trait]
    impl SecureStorage for FlakyStorage {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key).await
        }
        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.spend_write()?;
            self.inner.set(key, value).await
        }
        async fn remove(&self, key: &str) -> Result<()> {
            self.spend_write()?;
            self.inner.remove(key).await
        }
    }

    fn memory_store() -> (Arc<InMemorySecureStorage>, SecureSessionStore) {
        let storage = Arc::new(InMemorySecureStorage::new());
        (storage.clone(), SecureSessionStore::new(storage))
    }

    #[tokio::test]
    async fn test_round_trip_through_file_storage() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(FileSecureStorage::new(dir.path().join("session.toml")));
        let store = SecureSessionStore::new(storage);

        let session = Session::new(Uuid::new_v4())
            .with_token("tok")
            .with_name("Dana")
            .with_email("dana@example.com");
        store.save(&session).await.unwrap();

        assert_eq!(store.load().await, Some(session));
    }

    #[tokio::test]
    async fn test_save_removes_absent_fields() {
        let (storage, store) = memory_store();
        let id = Uuid::new_v4();
        store
            .save(&Session::new(id).with_token("old").with_name("Old Name"))
            .await
            .unwrap();
        store.save(&Session::new(id).with_token("new")).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.auth_token.as_deref(), Some("new"));
        assert_eq!(loaded.user_name, None);
        assert_eq!(storage.get(keys::USER_NAME).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_without_user_id_is_none() {
        let (storage, store) = memory_store();
        storage.set(keys::AUTH_TOKEN, "tok").await.unwrap();
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn test_load_with_garbage_user_id_is_none() {
        let (storage, store) = memory_store();
        storage.set(keys::USER_ID, "42").await.unwrap();
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn test_clear_removes_every_key() {
        let (storage, store) = memory_store();
        store
            .save(&Session::new(Uuid::new_v4()).with_token("t").with_email("e@x.io"))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.load().await, None);
        for key in keys::ALL {
            assert_eq!(storage.get(key).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_interrupted_relogin_never_mixes_users() {
        let alice = Session::new(Uuid::new_v4()).with_token("token-A").with_name("Alice");
        let bob = Session::new(Uuid::new_v4()).with_token("token-B").with_name("Bob");

        // A save takes five writes; Bob's is cut off at each point before the last.
        for budget in 5..=9 {
            let store = SecureSessionStore::new(Arc::new(FlakyStorage::failing_after(budget)));
            store.save(&alice).await.unwrap();

            let result = store.save(&bob).await;
            assert!(result.is_err());
            // Either Alice's untouched session or nothing, never a blend.
            match store.load().await {
                None => {}
                Some(loaded) => assert_eq!(loaded, alice, "budget {}", budget),
            }
        }

        let store = SecureSessionStore::new(Arc::new(FlakyStorage::failing_after(10)));
        store.save(&alice).await.unwrap();
        store.save(&bob).await.unwrap();
        assert_eq!(store.load().await, Some(bob));
    }

    #[tokio::test]
    async fn test_broken_storage_never_panics() {
        let store = SecureSessionStore::new(Arc::new(BrokenStorage));
        assert_eq!(store.load().await, None);
        assert!(store.save(&Session::new(Uuid::new_v4())).await.is_err());
        assert!(store.clear().await.is_err());
    }
}
