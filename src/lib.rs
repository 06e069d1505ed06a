//! chatline - client library for a streaming AI chat backend.
//!
//! The library keeps a local message list, authenticates a user against a
//! backend, and streams incremental AI responses into the last message of
//! the list. Services are explicitly constructed and wired by the
//! application root: an [`auth::AuthService`] and a [`chat::ChatService`]
//! share a [`session::SessionHandle`], and both take their HTTP and
//! persistence dependencies as trait objects from [`traits`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use chatline::adapters::{FileSessionStore, ReqwestHttpClient};
//! use chatline::auth::AuthService;
//! use chatline::chat::ChatService;
//! use chatline::config::ChatConfig;
//! use chatline::session::SessionHandle;
//!
//! let config = ChatConfig::from_env();
//! let http = Arc::new(ReqwestHttpClient::new());
//! let session = SessionHandle::new();
//!
//! let store = Arc::new(FileSessionStore::new().expect("home dir"));
//! let auth = AuthService::new(http.clone(), store, session.clone(), config.clone());
//! auth.restore().await;
//!
//! let mut chat = ChatService::new(http, session, config);
//! chat.send_stream_message("hello").await?;
//! ```

pub mod adapters;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod store;
pub mod traits;
