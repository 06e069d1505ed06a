//! Streaming response decoding and accumulation.
//!
//! The chat backend streams responses as UTF-8 text framed into
//! newline-separated records. Records carrying the `data: ` prefix hold a
//! payload; the payload `[DONE]` terminates the stream. This module turns
//! raw byte chunks into accumulated response text:
//!
//! - `decoder` - incremental UTF-8 decoding (`Utf8StreamDecoder`) and
//!   cross-chunk line framing (`LineSplitter`)
//! - `parser` - record classification (`parse_stream_line`, `StreamLine`)
//!   and payload accumulation (`StreamAccumulator`)

mod decoder;
mod parser;

pub use decoder::{LineSplitter, Utf8StreamDecoder};
pub use parser::{parse_stream_line, AccumulatorSignal, StreamAccumulator, StreamLine};

/// Prefix marking a significant record in the stream framing.
pub const DATA_PREFIX: &str = "data: ";

/// Payload value signalling normal stream termination.
pub const DONE_SENTINEL: &str = "[DONE]";
