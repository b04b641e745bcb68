use flowchat_llm::buffer_utils::SseFrame;
use flowchat_llm::ChatStreamChunk;
use flowchat_types::{NodeEvent, WorkflowEvent};
use thiserror::Error;

/// A decoded SSE frame, routed by its event name
///
/// `workflow` and `node` frames carry orchestration progress; every other
/// event name (including the default `message`) carries answer chunks.
#[derive(Debug, Clone)]
pub enum FrameEvent {
    /// Workflow lifecycle update
    Workflow(WorkflowEvent),

    /// Progress of a single workflow node
    Node(NodeEvent),

    /// Fragment of the assistant answer
    Chunk(ChatStreamChunk),

    /// `[DONE]` sentinel
    Done,

    /// Frame without payload (keep-alive or stray blank line)
    Empty,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Malformed {event} payload: {source}")]
    MalformedPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode a frame according to its event name
pub fn decode_frame(frame: &SseFrame) -> Result<FrameEvent, FrameError> {
    if frame.data.is_empty() {
        return Ok(FrameEvent::Empty);
    }

    let malformed = |source| FrameError::MalformedPayload {
        event: frame.event.clone(),
        source,
    };

    match frame.event.as_str() {
        "workflow" => serde_json::from_str(&frame.data)
            .map(FrameEvent::Workflow)
            .map_err(malformed),
        "node" => serde_json::from_str(&frame.data)
            .map(FrameEvent::Node)
            .map_err(malformed),
        _ if frame.is_done_marker() => Ok(FrameEvent::Done),
        _ => serde_json::from_str(&frame.data)
            .map(FrameEvent::Chunk)
            .map_err(malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_event_name() {
        let frame = SseFrame::new("workflow", r#"{"status":"finished"}"#);
        assert!(matches!(decode_frame(&frame), Ok(FrameEvent::Workflow(e)) if e.is_finished()));

        let frame = SseFrame::new("node", r#"{"node_id":"n1"}"#);
        assert!(matches!(decode_frame(&frame), Ok(FrameEvent::Node(_))));

        let frame = SseFrame::new("message", r#"{"choices":[{"delta":{"content":"x"}}]}"#);
        assert!(matches!(decode_frame(&frame), Ok(FrameEvent::Chunk(c)) if c.content() == "x"));
    }

    #[test]
    fn test_unknown_event_is_treated_as_message() {
        let frame = SseFrame::new("ping", r#"{"choices":[]}"#);
        assert!(matches!(decode_frame(&frame), Ok(FrameEvent::Chunk(_))));
    }

    #[test]
    fn test_done_and_empty() {
        assert!(matches!(
            decode_frame(&SseFrame::new("message", "[DONE]")),
            Ok(FrameEvent::Done)
        ));
        assert!(matches!(
            decode_frame(&SseFrame::new("node", "")),
            Ok(FrameEvent::Empty)
        ));
    }

    #[test]
    fn test_done_marker_only_ends_message_frames() {
        let frame = SseFrame::new("node", "[DONE]");
        assert!(decode_frame(&frame).is_err());
    }

    #[test]
    fn test_malformed_payload() {
        let frame = SseFrame::new("node", "{not valid json");
        let err = decode_frame(&frame).unwrap_err();

        let FrameError::MalformedPayload { event, .. } = &err;
        assert_eq!(event, "node");
        assert!(err.to_string().starts_with("Malformed node payload"));
    }
}
