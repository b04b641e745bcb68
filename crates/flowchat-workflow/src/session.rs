use crate::observer::TurnObserver;
use crate::reducer::EventReducer;
use crate::render::{render_workflow, RenderOptions, WorkflowView};
use anyhow::{Context, Result};
use flowchat_llm::{ChatCompletionRequest, ChatStreamClient, Conversation, SseFrameParser};
use flowchat_types::{SessionConfig, WorkflowState};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Result of a completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn_id: String,
    /// Assistant answer committed to the conversation (may be empty)
    pub answer: String,
    pub frames: usize,
    pub malformed_frames: usize,
    /// Data lines of a trailing frame that never got its blank line
    pub dropped_lines: usize,
}

/// One interactive chat session
///
/// Owns the conversation history and the workflow panel state and is their
/// only writer. Turns run one at a time: `submit` borrows the session
/// mutably until the response stream is exhausted.
pub struct ChatSession {
    client: Arc<dyn ChatStreamClient>,
    config: SessionConfig,
    conversation: Conversation,
    workflow: WorkflowState,
    render_options: RenderOptions,
}

impl ChatSession {
    pub fn new(client: Arc<dyn ChatStreamClient>, config: SessionConfig) -> Self {
        Self {
            client,
            config,
            conversation: Conversation::new(),
            workflow: WorkflowState::new(),
            render_options: RenderOptions::default(),
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn render_options(&self) -> RenderOptions {
        self.render_options
    }

    /// Flip output expansion; returns the new setting
    pub fn toggle_outputs(&mut self) -> bool {
        self.render_options.show_outputs = !self.render_options.show_outputs;
        self.render_options.show_outputs
    }

    /// Current workflow panel
    pub fn render(&self) -> WorkflowView {
        render_workflow(&self.workflow, &self.render_options)
    }

    /// Drop all workflow progress and start over at `running`
    pub fn clear_workflow(&mut self) {
        self.workflow.clear();
    }

    /// Send one user message and stream the answer
    ///
    /// Blank input is ignored and yields `Ok(None)`. Transport failures are
    /// returned as errors; whatever was recorded before the failure (the
    /// user message, workflow progress) stays in place and no assistant
    /// message is added.
    pub async fn submit(
        &mut self,
        input: &str,
        observer: &mut dyn TurnObserver,
    ) -> Result<Option<TurnOutcome>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let turn_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("turn", turn_id = %turn_id);

        self.run_turn(turn_id, input, observer)
            .instrument(span)
            .await
            .map(Some)
    }

    async fn run_turn(
        &mut self,
        turn_id: String,
        input: &str,
        observer: &mut dyn TurnObserver,
    ) -> Result<TurnOutcome> {
        let start_time = Instant::now();

        if self.config.reset_workflow_each_turn {
            self.workflow.clear();
        }

        self.conversation.push_user(input);
        let request =
            ChatCompletionRequest::new(&self.config.model, self.conversation.messages().to_vec());

        tracing::info!(
            model = %request.model,
            messages = request.messages.len(),
            "Starting turn"
        );

        let mut lines = self
            .client
            .stream_lines(&request)
            .await
            .context("Failed to open chat stream")?;

        let mut parser = SseFrameParser::new();
        let mut reducer = EventReducer::new(&mut self.workflow, self.render_options);

        while let Some(line) = lines.next().await {
            let line = line.context("Chat stream interrupted")?;
            if let Some(frame) = parser.feed(&line) {
                reducer.apply(&frame, observer);
            }
        }

        let dropped_lines = parser.finish();
        let summary = reducer.finish();

        self.conversation.push_assistant(summary.text.clone());

        tracing::info!(
            frames = summary.frames,
            malformed_frames = summary.malformed_frames,
            answer_chars = summary.text.chars().count(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Turn finished"
        );

        Ok(TurnOutcome {
            turn_id,
            answer: summary.text,
            frames: summary.frames,
            malformed_frames: summary.malformed_frames,
            dropped_lines,
        })
    }
}
