use std::borrow::Cow;
use std::collections::VecDeque;

/// Circular buffer for line-based parsing of a chunked response body
/// Chunks may split lines (and multi-byte characters) anywhere
pub struct CircularLineBuffer {
    buffer: VecDeque<u8>,
}

impl CircularLineBuffer {
    /// Create a new buffer with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Add bytes to the buffer
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract next line (up to \n) from buffer, without the line terminator
    /// Returns None if no complete line is available
    pub fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;

        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();

        Some(decode_line(&line_bytes))
    }

    /// Drain whatever is left once the body has ended
    /// A body that does not end with a newline still carries a last line
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line_bytes: Vec<u8> = self.buffer.drain(..).collect();
        Some(decode_line(&line_bytes))
    }

    /// Current buffer size
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Invalid UTF-8 becomes U+FFFD; the damage stays inside its own line
fn decode_line(line_bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(line_bytes);
    if let Cow::Owned(_) = text {
        tracing::debug!(bytes = line_bytes.len(), "Replaced invalid UTF-8 in stream line");
    }
    text.trim_end_matches(['\r', '\n']).to_string()
}
