use crate::types::Message;
use anyhow::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Raw text lines of a streaming response body, in arrival order
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Trait for endpoints that stream chat completions as SSE lines
/// 
/// Implementations only deal with transport; framing and decoding of the
/// lines belongs to the caller.
#[async_trait]
pub trait ChatStreamClient: Send + Sync {
    /// Open a streaming chat completion and return its body line by line
    async fn stream_lines(&self, request: &ChatCompletionRequest) -> Result<LineStream>;
}

/// Body of `POST /chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    /// Ask the adapter to interleave `workflow` and `node` events
    pub show_node_events: bool,
}

impl ChatCompletionRequest {
    /// Streaming request with workflow node events enabled
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
            show_node_events: true,
        }
    }
}
