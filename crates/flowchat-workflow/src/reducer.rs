use crate::observer::TurnObserver;
use crate::render::{render_workflow, RenderOptions};
use crate::types::{decode_frame, FrameError, FrameEvent};
use flowchat_llm::buffer_utils::SseFrame;
use flowchat_types::WorkflowState;

/// What a frame did to the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Workflow,
    Node(String),
    Text,
    /// Well-formed but carried nothing to apply (`[DONE]`, empty delta, keep-alive)
    Nothing,
    /// Payload failed to decode and was dropped
    Discarded,
}

/// Counters and answer text of a completed turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub text: String,
    pub frames: usize,
    pub malformed_frames: usize,
}

/// Applies decoded frames of one turn
///
/// Workflow and node frames mutate the session's [`WorkflowState`] and
/// re-render the panel; answer chunks grow the turn's text. A frame that
/// fails to decode leaves everything untouched.
pub struct EventReducer<'a> {
    workflow: &'a mut WorkflowState,
    options: RenderOptions,
    summary: TurnSummary,
}

impl<'a> EventReducer<'a> {
    pub fn new(workflow: &'a mut WorkflowState, options: RenderOptions) -> Self {
        Self {
            workflow,
            options,
            summary: TurnSummary::default(),
        }
    }

    pub fn apply(&mut self, frame: &SseFrame, observer: &mut dyn TurnObserver) -> Applied {
        self.summary.frames += 1;

        let event = match decode_frame(frame) {
            Ok(event) => event,
            Err(FrameError::MalformedPayload { event, source }) => {
                tracing::debug!(event = %event, error = %source, "Discarding malformed frame");
                self.summary.malformed_frames += 1;
                return Applied::Discarded;
            }
        };

        match event {
            FrameEvent::Workflow(workflow_event) => {
                if workflow_event.is_finished() {
                    self.workflow.mark_finished();
                }
                self.render(observer);
                Applied::Workflow
            }
            FrameEvent::Node(node_event) => {
                let node_id = self.workflow.apply_node_event(node_event);
                tracing::trace!(node_id = %node_id, "Node updated");
                self.render(observer);
                Applied::Node(node_id)
            }
            FrameEvent::Chunk(chunk) => {
                let delta = chunk.content();
                if delta.is_empty() {
                    return Applied::Nothing;
                }
                self.summary.text.push_str(delta);
                observer.answer_updated(&self.summary.text);
                Applied::Text
            }
            FrameEvent::Done | FrameEvent::Empty => Applied::Nothing,
        }
    }

    /// Answer assembled so far
    pub fn text(&self) -> &str {
        &self.summary.text
    }

    pub fn finish(self) -> TurnSummary {
        self.summary
    }

    fn render(&self, observer: &mut dyn TurnObserver) {
        let view = render_workflow(self.workflow, &self.options);
        observer.workflow_updated(&view);
    }
}
