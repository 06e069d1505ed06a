use serde::{Deserialize, Serialize};

/// Request body for the chat streaming endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamRequest {
    /// The user's message.
    pub message: String,
    /// Platform identifier, mirrored in the `Platform` header.
    pub platform: String,
    /// Application identifier, mirrored in the `App` header.
    pub app: String,
}

impl StreamRequest {
    /// Build a request for the given message and client identifiers.
    pub fn new(
        message: impl Into<String>,
        platform: impl Into<String>,
        app: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            platform: platform.into(),
            app: app.into(),
        }
    }
}

/// Response body of the login endpoint.
///
/// The backend returns only a success flag; parsing it into a typed
/// struct keeps a malformed payload a parse error rather than a silent
/// shape mismatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    /// Display name shown in the UI; defaults to the username.
    pub display_name: String,
}

impl UserProfile {
    /// Create a profile whose display name is the username.
    pub fn from_username(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            display_name: username.clone(),
            username,
        }
    }
}

/// Result of a login attempt, surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Whether the credentials were accepted.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// The signed-in user on success.
    pub user: Option<UserProfile>,
}

impl LoginOutcome {
    /// Successful login for the given user.
    pub fn accepted(user: UserProfile) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            user: Some(user),
        }
    }

    /// Failed login with a reason.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
        }
    }
}
