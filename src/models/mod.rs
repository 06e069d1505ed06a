//! Data model types shared across the crate.
//!
//! # Module structure
//! - `message` - chat message record and id/time helpers
//! - `request` - wire types for the auth and streaming endpoints

mod message;
mod request;

pub use message::{format_time, Message};
pub use request::{LoginOutcome, LoginResponse, StreamRequest, UserProfile};
