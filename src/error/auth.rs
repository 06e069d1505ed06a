//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
///
/// These cover the login exchange with the backend and the durable
/// session persistence layer. A failed login never mutates session state.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// The backend rejected the credentials (`isSuccess: false`).
    InvalidCredentials,

    /// The login endpoint returned a non-2xx status.
    ServerError { status: u16, message: String },

    /// The login response body did not match the expected shape.
    MalformedResponse { message: String },

    /// The HTTP request itself failed.
    Transport { message: String },

    /// The session could not be read from durable storage.
    PersistenceLoadFailed { message: String },

    /// The session could not be written to durable storage.
    PersistenceSaveFailed { message: String },

    /// No session is present (user not logged in).
    NotAuthenticated,
}

impl AuthError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid username or password.".to_string(),
            AuthError::ServerError { status, .. } => {
                format!("Login failed: the server returned status {}.", status)
            }
            AuthError::MalformedResponse { .. } => {
                "The server sent an unexpected response. Please try again.".to_string()
            }
            AuthError::Transport { .. } => {
                "Could not reach the login server. Please check your connection.".to_string()
            }
            AuthError::PersistenceLoadFailed { .. } => {
                "Could not load your saved session. Please sign in again.".to_string()
            }
            AuthError::PersistenceSaveFailed { .. } => {
                "Could not save your session. Please check file permissions.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "E_AUTH_REJECTED",
            AuthError::ServerError { .. } => "E_AUTH_SERVER",
            AuthError::MalformedResponse { .. } => "E_AUTH_SHAPE",
            AuthError::Transport { .. } => "E_AUTH_TRANSPORT",
            AuthError::PersistenceLoadFailed { .. } => "E_AUTH_LOAD",
            AuthError::PersistenceSaveFailed { .. } => "E_AUTH_SAVE",
            AuthError::NotAuthenticated => "E_AUTH_NONE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::ServerError { status, message } => {
                write!(f, "Login server error ({}): {}", status, message)
            }
            AuthError::MalformedResponse { message } => {
                write!(f, "Malformed login response: {}", message)
            }
            AuthError::Transport { message } => write!(f, "Login transport error: {}", message),
            AuthError::PersistenceLoadFailed { message } => {
                write!(f, "Failed to load session: {}", message)
            }
            AuthError::PersistenceSaveFailed { message } => {
                write!(f, "Failed to save session: {}", message)
            }
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials() {
        let err = AuthError::InvalidCredentials;
        assert_eq!(err.error_code(), "E_AUTH_REJECTED");
        assert!(err.user_message().contains("Invalid"));
    }

    #[test]
    fn test_server_error_carries_status() {
        let err = AuthError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.error_code(), "E_AUTH_SERVER");
        assert!(err.to_string().contains("503"));
        assert!(err.user_message().contains("503"));
    }

    #[test]
    fn test_malformed_response() {
        let err = AuthError::MalformedResponse {
            message: "missing field `isSuccess`".to_string(),
        };
        assert_eq!(err.error_code(), "E_AUTH_SHAPE");
        assert!(err.to_string().contains("isSuccess"));
    }

    #[test]
    fn test_persistence_errors() {
        let load = AuthError::PersistenceLoadFailed {
            message: "corrupt json".to_string(),
        };
        let save = AuthError::PersistenceSaveFailed {
            message: "read-only fs".to_string(),
        };
        assert_eq!(load.error_code(), "E_AUTH_LOAD");
        assert_eq!(save.error_code(), "E_AUTH_SAVE");
    }

    #[test]
    fn test_display_format() {
        let err = AuthError::Transport {
            message: "connection refused".to_string(),
        };
        assert!(format!("{}", err).contains("connection refused"));
    }
}
