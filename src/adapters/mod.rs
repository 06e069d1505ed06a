//! Adapter implementations of the crate's trait seams.
//!
//! - [`ReqwestHttpClient`] - production HTTP client
//! - [`FileSessionStore`] - session persistence under `~/.chatline/`
//! - [`mock`] - scripted implementations for tests

pub mod file_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::FileSessionStore;
pub use reqwest_http::ReqwestHttpClient;
