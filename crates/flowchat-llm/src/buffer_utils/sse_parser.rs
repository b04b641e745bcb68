/// Event name used when a frame carries no `event:` line
pub const DEFAULT_EVENT: &str = "message";

/// Sentinel payload closing an OpenAI-style stream
pub const DONE_MARKER: &str = "[DONE]";

/// One complete server-sent event: its name and joined data payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
}

impl SseFrame {
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }

    /// Check if this frame is the end-of-stream sentinel
    pub fn is_done_marker(&self) -> bool {
        self.data == DONE_MARKER
    }
}

/// Incremental SSE frame parser
///
/// Lines are fed one at a time; a blank line completes the pending frame.
/// Only `event:` and `data:` fields are interpreted, everything else
/// (comments, `id:`, `retry:`) is skipped.
#[derive(Debug)]
pub struct SseFrameParser {
    event: String,
    data_lines: Vec<String>,
}

impl Default for SseFrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SseFrameParser {
    pub fn new() -> Self {
        Self {
            event: DEFAULT_EVENT.to_string(),
            data_lines: Vec::new(),
        }
    }

    /// Feed a single line, returning a frame when the line completes one
    pub fn feed(&mut self, line: &str) -> Option<SseFrame> {
        let line = line.trim();

        if line.is_empty() {
            return Some(self.flush());
        }

        if let Some(event) = line.strip_prefix("event:") {
            self.event = event.trim().to_string();
        } else if let Some(data) = line.strip_prefix("data:") {
            self.data_lines.push(data.trim().to_string());
        }

        None
    }

    /// Emit the pending frame and reset to the default event kind
    pub fn flush(&mut self) -> SseFrame {
        let data = self.data_lines.join("\n").trim().to_string();
        self.data_lines.clear();
        let event = std::mem::replace(&mut self.event, DEFAULT_EVENT.to_string());

        SseFrame { event, data }
    }

    /// Current event kind of the frame being assembled
    pub fn current_event(&self) -> &str {
        &self.event
    }

    /// Number of data lines waiting for a terminating blank line
    pub fn pending_lines(&self) -> usize {
        self.data_lines.len()
    }

    /// End of stream. A frame without its terminating blank line is dropped;
    /// returns how many data lines were discarded.
    pub fn finish(self) -> usize {
        let dropped = self.data_lines.len();
        if dropped > 0 {
            tracing::debug!(
                event = %self.event,
                dropped_lines = dropped,
                "Dropping incomplete frame at end of stream"
            );
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut SseFrameParser, lines: &[&str]) -> Vec<SseFrame> {
        lines.iter().filter_map(|line| parser.feed(line)).collect()
    }

    #[test]
    fn test_default_event_frame() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["data: {\"a\":1}", ""]);

        assert_eq!(frames, vec![SseFrame::new("message", "{\"a\":1}")]);
    }

    #[test]
    fn test_named_event_resets_after_blank_line() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(
            &mut parser,
            &["event: node", "data: {}", "", "data: x", ""],
        );

        assert_eq!(frames[0].event, "node");
        assert_eq!(frames[1].event, "message");
        assert_eq!(parser.current_event(), "message");
    }

    #[test]
    fn test_multiline_data_is_joined() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["data: {\"a\":", "data:  1}  ", ""]);

        assert_eq!(frames[0].data, "{\"a\":\n1}");
    }

    #[test]
    fn test_only_first_prefix_is_stripped() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["data: data: nested", ""]);

        assert_eq!(frames[0].data, "data: nested");
    }

    #[test]
    fn test_every_blank_line_emits_one_frame() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["", "  ", "\r"]);

        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.data.is_empty() && f.event == "message"));
    }

    #[test]
    fn test_no_frame_without_blank_line() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["event: workflow", "data: {}", "data: {}"]);

        assert!(frames.is_empty());
        assert_eq!(parser.pending_lines(), 2);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(
            &mut parser,
            &[": keep-alive", "id: 7", "retry: 1000", "data: ok", ""],
        );

        assert_eq!(frames, vec![SseFrame::new("message", "ok")]);
    }

    #[test]
    fn test_crlf_lines() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["event: workflow\r", "data: {}\r", "\r"]);

        assert_eq!(frames, vec![SseFrame::new("workflow", "{}")]);
    }

    #[test]
    fn test_finish_drops_incomplete_frame() {
        let mut parser = SseFrameParser::new();
        assert!(parser.feed("data: {\"partial\":true}").is_none());

        assert_eq!(parser.finish(), 1);
    }

    #[test]
    fn test_done_marker() {
        let mut parser = SseFrameParser::new();
        let frames = feed_all(&mut parser, &["data: [DONE]", ""]);

        assert!(frames[0].is_done_marker());
    }
}
