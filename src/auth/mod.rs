//! Authentication service.
//!
//! Exchanges credentials with the backend login endpoint, derives the
//! synthetic session token (the backend returns only a success flag), and
//! keeps the shared [`SessionHandle`] and the durable [`SessionStore`] in
//! sync. State machine: Unauthenticated --login success--> Authenticated
//! --logout--> Unauthenticated; a failed login leaves state unchanged.

use std::sync::Arc;

use chrono::Utc;

use crate::config::ChatConfig;
use crate::error::AuthError;
use crate::models::{LoginOutcome, LoginResponse, UserProfile};
use crate::session::{Session, SessionHandle};
use crate::traits::{Headers, HttpClient, SessionStore, StoredSession};

/// Service handling login, logout, and session restoration.
pub struct AuthService {
    http: Arc<dyn HttpClient>,
    store: Arc<dyn SessionStore>,
    session: SessionHandle,
    config: ChatConfig,
}

impl AuthService {
    /// Create the service. Call [`restore`](Self::restore) afterwards to
    /// pick up a persisted session.
    pub fn new(
        http: Arc<dyn HttpClient>,
        store: Arc<dyn SessionStore>,
        session: SessionHandle,
        config: ChatConfig,
    ) -> Self {
        Self {
            http,
            store,
            session,
            config,
        }
    }

    /// Restore a persisted session, trust-on-read.
    ///
    /// When the durable store holds both a token and a user record, the
    /// session becomes authenticated without re-validating against the
    /// server. Returns whether a session was restored. Load failures are
    /// logged and treated as "no stored session".
    pub async fn restore(&self) -> bool {
        match self.store.load().await {
            Ok(Some(stored)) => {
                tracing::info!(username = %stored.user.username, "restored persisted session");
                self.session
                    .set(Session::authenticated(stored.token, stored.user));
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted session");
                false
            }
        }
    }

    /// Attempt to sign in with the given credentials.
    ///
    /// Returns a discriminated success/failure outcome with a
    /// human-readable message. Every failure path leaves the session
    /// unchanged and writes nothing durable.
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        match self.exchange_credentials(username, password).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "login accepted");
                LoginOutcome::accepted(user)
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), error = %e, "login failed");
                LoginOutcome::rejected(e.user_message())
            }
        }
    }

    /// Sign out: clear process state and the durable entries.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear();
        tracing::info!("logged out");
        self.store
            .clear()
            .await
            .map_err(|e| AuthError::PersistenceSaveFailed {
                message: e.to_string(),
            })
    }

    /// Headers for authenticated requests, from the current session.
    pub fn auth_headers(&self) -> Headers {
        self.session.auth_headers()
    }

    /// Whether a user is currently signed in.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Perform the credential exchange and, on acceptance, commit the
    /// new session.
    async fn exchange_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        let body = format!(
            "username={}&password={}",
            urlencoding::encode(username),
            urlencoding::encode(password)
        );
        let mut headers = Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );

        let response = self
            .http
            .post(&self.config.login_url(), &body, &headers)
            .await
            .map_err(|e| AuthError::Transport {
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(AuthError::ServerError {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }

        let login: LoginResponse =
            response.json().map_err(|e| AuthError::MalformedResponse {
                message: e.to_string(),
            })?;

        if !login.is_success {
            return Err(AuthError::InvalidCredentials);
        }

        // The backend returns no token, so derive a synthetic one.
        let token = format!("logged-in-{}", Utc::now().timestamp_millis());
        let user = UserProfile::from_username(username);

        self.session
            .set(Session::authenticated(&token, user.clone()));

        let stored = StoredSession {
            token,
            user: user.clone(),
        };
        if let Err(e) = self.store.save(&stored).await {
            // In-process auth still holds; the session just won't survive
            // a restart.
            tracing::warn!(error = %e, "failed to persist session");
        }

        Ok(user)
    }
}
