//! Mock adapter implementations for testing.

pub mod http;
pub mod session;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use session::MemorySessionStore;
