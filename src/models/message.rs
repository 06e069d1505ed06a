use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single chat message.
///
/// `text` is the only field mutated after creation; it is rewritten in
/// place while a streaming response is in progress. Everything else is
/// fixed at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Opaque unique identifier.
    pub id: String,
    /// Message content. Rewritten wholesale during streaming.
    pub text: String,
    /// Display name of the sender.
    pub sender: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Whether the local user sent this message.
    pub is_own: bool,
}

impl Message {
    /// Create a new message with a generated id and the current time.
    pub fn new(text: impl Into<String>, sender: impl Into<String>, is_own: bool) -> Self {
        Self {
            id: generate_message_id(),
            text: text.into(),
            sender: sender.into(),
            timestamp: Utc::now(),
            is_own,
        }
    }
}

/// Generate a message id: millisecond timestamp plus a random suffix.
///
/// The suffix comes from a UUIDv4, which is stronger than strictly needed;
/// ids are display handles, not uniqueness-checked keys.
fn generate_message_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", millis, &suffix[..9])
}

/// Format a timestamp as `HH:MM` for display.
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    format!("{:02}:{:02}", timestamp.hour(), timestamp.minute())
}
