//! Streaming-related error types.
//!
//! These errors cover the transport path of a streaming chat response.
//! They are recovered inside the chat service (the store receives a fixed
//! apology message) and logged for diagnostics; no retries are performed.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone)]
pub enum StreamError {
    /// The streaming endpoint returned a non-2xx status.
    ServerError { status: u16, message: String },

    /// The request could not be sent or the response body acquired.
    ConnectionFailed { message: String },

    /// Reading a chunk from the open stream failed.
    ConnectionLost { message: String },

    /// The request body could not be serialized.
    RequestEncoding { message: String },
}

impl StreamError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ServerError { status, .. } => {
                format!("The chat server returned an error (status {}).", status)
            }
            StreamError::ConnectionFailed { .. } => {
                "Could not reach the chat server. Please check your connection.".to_string()
            }
            StreamError::ConnectionLost { .. } => {
                "The connection was lost while receiving a response.".to_string()
            }
            StreamError::RequestEncoding { .. } => {
                "The message could not be sent. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ServerError { .. } => "E_STREAM_STATUS",
            StreamError::ConnectionFailed { .. } => "E_STREAM_CONNECT",
            StreamError::ConnectionLost { .. } => "E_STREAM_LOST",
            StreamError::RequestEncoding { .. } => "E_STREAM_ENCODE",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ServerError { status, message } => {
                write!(f, "Stream server error ({}): {}", status, message)
            }
            StreamError::ConnectionFailed { message } => {
                write!(f, "Stream connection failed: {}", message)
            }
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::RequestEncoding { message } => {
                write!(f, "Stream request encoding failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {}

impl From<serde_json::Error> for StreamError {
    fn from(e: serde_json::Error) -> Self {
        StreamError::RequestEncoding {
            message: e.to_string(),
        }
    }
}
