//! File-backed session persistence.
//!
//! Stores the signed-in session as a JSON document at
//! `~/.chatline/.session.json`. Both logical entries (token and user
//! record) live in one document; a document missing either cannot be
//! produced by [`StoredSession`], so load is all-or-nothing.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::traits::{SessionStore, SessionStoreError, StoredSession};

/// The session directory name under the home directory.
const SESSION_DIR: &str = ".chatline";

/// The session file name.
const SESSION_FILE: &str = ".session.json";

/// Session store writing to a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    session_path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `~/.chatline/`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            session_path: home.join(SESSION_DIR).join(SESSION_FILE),
        })
    }

    /// Create a store at an explicit file path. Used by tests.
    pub fn with_path(session_path: PathBuf) -> Self {
        Self { session_path }
    }

    /// Path to the session file.
    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let bytes = match fs::read(&self.session_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::LoadFailed(e.to_string())),
        };

        let session = serde_json::from_slice(&bytes)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        Ok(Some(session))
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.session_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        fs::write(&self.session_path, json)
            .await
            .map_err(|e| SessionStoreError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.session_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::ClearFailed(e.to_string())),
        }
    }
}
