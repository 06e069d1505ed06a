//! Incremental UTF-8 decoding and line framing for byte-chunked streams.
//!
//! Network chunks can end mid-codepoint and mid-line. `Utf8StreamDecoder`
//! carries incomplete byte sequences across chunk boundaries so text is
//! emitted as soon as codepoints are complete; `LineSplitter` carries
//! incomplete lines so a record is processed exactly once, when its
//! newline arrives.

/// Streaming UTF-8 decoder with carry-over for split multi-byte sequences.
///
/// Each call to [`decode`](Self::decode) returns the maximal decodable
/// prefix of the carried bytes plus the new chunk. Bytes that form the
/// start of an incomplete multi-byte sequence are held back until the next
/// chunk. Invalid sequences are replaced with U+FFFD, matching a lossy
/// incremental text decoder.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    carry: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Create a decoder with an empty carry-over buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all newly completed text.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(chunk);

        let mut out = String::new();
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            // Invalid sequence in the middle of the chunk.
                            out.push('\u{FFFD}');
                            rest = &rest[valid + len..];
                        }
                        None => {
                            // Incomplete sequence at the end; wait for more bytes.
                            self.carry = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush the decoder at end-of-stream.
    ///
    /// A non-empty carry-over at this point can never complete, so it is
    /// replaced with a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.carry.is_empty() {
            String::new()
        } else {
            self.carry.clear();
            "\u{FFFD}".to_string()
        }
    }

    /// Whether the decoder is holding an incomplete sequence.
    pub fn has_pending(&self) -> bool {
        !self.carry.is_empty()
    }
}

/// Splits decoded text into complete lines across chunk boundaries.
///
/// Text pushed without a trailing newline is buffered until the newline
/// arrives in a later chunk. Trailing `\r` is stripped so CRLF streams
/// frame identically to LF streams.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: String,
}

impl LineSplitter {
    /// Create a splitter with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push decoded text, returning every line completed by it.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.buffer.push_str(text);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let line = self.buffer[..pos].trim_end_matches('\r').to_string();
            self.buffer.drain(..=pos);
            lines.push(line);
        }
        lines
    }

    /// Flush the buffer at end-of-stream.
    ///
    /// Returns the trailing unterminated line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = self.buffer.trim_end_matches('\r').to_string();
        self.buffer.clear();
        Some(line)
    }
}
