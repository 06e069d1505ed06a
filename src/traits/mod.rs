//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP operations (POST, streaming POST)
//! - [`SessionStore`] - durable persistence of the signed-in session

pub mod http;
pub mod session;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use session::{SessionStore, SessionStoreError, StoredSession};
