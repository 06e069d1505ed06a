//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{SessionStore, SessionStoreError, StoredSession};

/// Session store keeping the entries in memory.
///
/// Clones share the same storage, so a test can hold one handle while
/// the service under test holds another.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Option<StoredSession>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a session.
    pub fn with_session(session: StoredSession) -> Self {
        let store = Self::new();
        *store.inner.lock().unwrap() = Some(session);
        store
    }

    /// Make subsequent saves fail, for error-path tests.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    /// Current stored session, bypassing the trait.
    pub fn stored(&self) -> Option<StoredSession> {
        self.inner.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        Ok(self.inner.lock().unwrap().clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(SessionStoreError::SaveFailed("scripted failure".to_string()));
        }
        *self.inner.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.inner.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    fn sample() -> StoredSession {
        StoredSession {
            token: "logged-in-1".to_string(),
            user: UserProfile::from_username("u"),
        }
    }

    #[tokio::test]
    async fn test_empty_store_loads_none() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemorySessionStore::new();
        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(sample()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = MemorySessionStore::new();
        let handle = store.clone();
        store.save(&sample()).await.unwrap();
        assert_eq!(handle.stored(), Some(sample()));
    }

    #[tokio::test]
    async fn test_scripted_save_failure() {
        let store = MemorySessionStore::new();
        store.fail_saves(true);
        assert!(store.save(&sample()).await.is_err());
        assert_eq!(store.stored(), None);
    }
}
