//! Error taxonomy for the chat client.
//!
//! Errors are split by domain:
//! - [`AuthError`] - login, logout, and session persistence failures
//! - [`StreamError`] - transport and decode failures during streaming
//!
//! [`ChatError`] is the umbrella type returned by the top-level services.
//! Stream transport failures are recovered locally (the store receives a
//! fixed apology message) and never propagate past the chat service; the
//! umbrella therefore mostly carries auth failures and the overlap guard.

mod auth;
mod stream;

pub use auth::AuthError;
pub use stream::StreamError;

use thiserror::Error;

/// Top-level error for chat client operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Authentication failed or session persistence broke.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Streaming transport or decode failure.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// A stream was started while another one is active.
    #[error("a streaming response is already in progress")]
    StreamInProgress,
}
