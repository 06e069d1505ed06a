//! Process-resident session state.
//!
//! [`Session`] is the plain state; [`SessionHandle`] is the shared form
//! the application root hands to both the auth service (writer) and the
//! chat service (reads auth headers per request). All mutation happens on
//! the single control path, the lock only makes the sharing explicit.

use std::sync::{Arc, RwLock};

use crate::models::UserProfile;
use crate::traits::Headers;

/// Authentication state for the current process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Whether a user is signed in.
    pub authenticated: bool,
    /// Opaque auth token, present when authenticated.
    pub token: Option<String>,
    /// The signed-in user, present when authenticated.
    pub user: Option<UserProfile>,
}

impl Session {
    /// An unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// An authenticated session with the given token and user.
    pub fn authenticated(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            authenticated: true,
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Headers for authenticated requests.
    ///
    /// Carries the bearer token when signed in; empty otherwise.
    pub fn auth_headers(&self) -> Headers {
        let mut headers = Headers::new();
        if let (true, Some(token)) = (self.authenticated, &self.token) {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers
    }
}

/// Shared handle to the session state.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
}

impl SessionHandle {
    /// Create a handle around an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle around an existing session.
    pub fn from_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Snapshot of the current session.
    pub fn snapshot(&self) -> Session {
        // A poisoned lock still holds a coherent Session value.
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether a user is currently signed in.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .authenticated
    }

    /// Headers for authenticated requests, from the current state.
    pub fn auth_headers(&self) -> Headers {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .auth_headers()
    }

    /// Replace the session state.
    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = session;
    }

    /// Reset to the unauthenticated state.
    pub fn clear(&self) {
        self.set(Session::new());
    }
}
