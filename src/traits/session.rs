//! Session persistence trait abstraction.
//!
//! The signed-in session survives process restarts as two logical
//! entries: the auth token and the serialized user record. Implementations
//! include the production file-backed store and an in-memory mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

/// The durable form of a signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    /// Opaque auth token.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

/// Session persistence errors.
#[derive(Debug, Clone)]
pub enum SessionStoreError {
    /// Failed to load the stored session.
    LoadFailed(String),
    /// Failed to save the session.
    SaveFailed(String),
    /// Failed to clear the stored session.
    ClearFailed(String),
    /// Serialization/deserialization error.
    Serialization(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            SessionStoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionStoreError::ClearFailed(msg) => write!(f, "Failed to clear session: {}", msg),
            SessionStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Trait for durable session storage.
///
/// A session is only considered restorable when both entries (token and
/// user record) are present; [`load`](Self::load) returns `None` otherwise.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, if both entries are present.
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;

    /// Save the session, overwriting any previous entries.
    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError>;

    /// Remove the stored entries. Idempotent.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
