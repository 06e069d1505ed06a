//! Tests for environment-based configuration overrides.
//!
//! These mutate process environment variables, so they are serialized.

use chatline::config::{ChatConfig, DEFAULT_AUTH_BASE_URL, DEFAULT_CHAT_BASE_URL};
use serial_test::serial;

#[test]
#[serial]
fn test_from_env_without_overrides_uses_defaults() {
    std::env::remove_var("CHATLINE_AUTH_URL");
    std::env::remove_var("CHATLINE_CHAT_URL");

    let config = ChatConfig::from_env();
    assert_eq!(config.auth_base_url, DEFAULT_AUTH_BASE_URL);
    assert_eq!(config.chat_base_url, DEFAULT_CHAT_BASE_URL);
}

#[test]
#[serial]
fn test_from_env_applies_overrides() {
    std::env::set_var("CHATLINE_AUTH_URL", "http://auth.local:8080");
    std::env::set_var("CHATLINE_CHAT_URL", "http://chat.local:8080/api");

    let config = ChatConfig::from_env();
    assert_eq!(config.login_url(), "http://auth.local:8080/Login/LoginAct");
    assert_eq!(config.stream_url(), "http://chat.local:8080/api/stream");

    std::env::remove_var("CHATLINE_AUTH_URL");
    std::env::remove_var("CHATLINE_CHAT_URL");
}
