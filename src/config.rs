//! Client configuration.
//!
//! Carries the backend base URLs and the fixed client identifiers sent
//! with every chat request. Use the builder-style setters to customize,
//! or [`ChatConfig::from_env`] to pick up environment overrides.

/// Default base URL of the authentication backend.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://localhost:7123";

/// Default base URL of the chat API.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://localhost:7123/api/OpenAiApi";

/// Configuration for the chat client services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the authentication backend (no trailing slash).
    pub auth_base_url: String,
    /// Base URL of the chat API (no trailing slash).
    pub chat_base_url: String,
    /// Value of the `Platform` header and request field.
    pub platform: String,
    /// Value of the `App` header and request field.
    pub app: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            platform: "web".to_string(),
            app: "chatline".to_string(),
        }
    }
}

impl ChatConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auth backend base URL.
    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    /// Set the chat API base URL.
    pub fn with_chat_base_url(mut self, url: impl Into<String>) -> Self {
        self.chat_base_url = url.into();
        self
    }

    /// Set the platform identifier.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the application identifier.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Create a config with `CHATLINE_AUTH_URL` / `CHATLINE_CHAT_URL`
    /// environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CHATLINE_AUTH_URL") {
            config.auth_base_url = url;
        }
        if let Ok(url) = std::env::var("CHATLINE_CHAT_URL") {
            config.chat_base_url = url;
        }
        config
    }

    /// Full URL of the login endpoint.
    pub fn login_url(&self) -> String {
        format!("{}/Login/LoginAct", self.auth_base_url)
    }

    /// Full URL of the chat streaming endpoint.
    pub fn stream_url(&self) -> String {
        format!("{}/stream", self.chat_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.auth_base_url, DEFAULT_AUTH_BASE_URL);
        assert_eq!(config.platform, "web");
        assert_eq!(config.app, "chatline");
    }

    #[test]
    fn test_builder_setters() {
        let config = ChatConfig::new()
            .with_auth_base_url("http://auth.test")
            .with_chat_base_url("http://chat.test/api")
            .with_platform("desktop")
            .with_app("demo");

        assert_eq!(config.login_url(), "http://auth.test/Login/LoginAct");
        assert_eq!(config.stream_url(), "http://chat.test/api/stream");
        assert_eq!(config.platform, "desktop");
        assert_eq!(config.app, "demo");
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ChatConfig::default();
        assert!(config.login_url().ends_with("/Login/LoginAct"));
        assert!(config.stream_url().ends_with("/stream"));
    }
}
