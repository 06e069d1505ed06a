//! Record classification and payload accumulation.

use super::{DATA_PREFIX, DONE_SENTINEL};

/// A classified line from the response stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamLine {
    /// A `data: ` record carrying a non-empty payload.
    Data(String),
    /// The `[DONE]` termination payload.
    Done,
    /// Anything else: missing prefix, or a payload that trims to empty.
    Ignored,
}

/// Classify a single line of the stream framing.
///
/// Only lines starting with the exact `data: ` prefix are significant;
/// the remainder is trimmed to form the payload. `[DONE]` terminates the
/// stream. Everything else is discarded.
pub fn parse_stream_line(line: &str) -> StreamLine {
    let Some(rest) = line.strip_prefix(DATA_PREFIX) else {
        return StreamLine::Ignored;
    };

    let payload = rest.trim();
    if payload == DONE_SENTINEL {
        StreamLine::Done
    } else if payload.is_empty() {
        StreamLine::Ignored
    } else {
        StreamLine::Data(payload.to_string())
    }
}

/// What a fed line did to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorSignal {
    /// The accumulated text grew; the sink should be updated.
    Updated,
    /// The termination payload arrived; stop reading.
    Finished,
    /// The line produced no change.
    Ignored,
}

/// Accumulates stream payloads into the full response text.
///
/// Payloads are appended verbatim; the accumulated text only ever grows
/// until [`Finished`](AccumulatorSignal::Finished). Lines fed after
/// termination are ignored.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    text: String,
    done: bool,
}

impl StreamAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one complete line, reporting what changed.
    pub fn feed_line(&mut self, line: &str) -> AccumulatorSignal {
        if self.done {
            return AccumulatorSignal::Ignored;
        }

        match parse_stream_line(line) {
            StreamLine::Data(payload) => {
                self.text.push_str(&payload);
                AccumulatorSignal::Updated
            }
            StreamLine::Done => {
                self.done = true;
                AccumulatorSignal::Finished
            }
            StreamLine::Ignored => AccumulatorSignal::Ignored,
        }
    }

    /// The full accumulated text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the termination payload has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
