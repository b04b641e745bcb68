pub mod types;
pub mod traits;
pub mod config;
pub mod history;
pub mod streaming;
pub mod buffer_utils;
pub mod openai;

pub use traits::{ChatStreamClient, ChatCompletionRequest, LineStream};
pub use config::ClientConfig;
pub use history::Conversation;
pub use streaming::{ChatStreamChunk, lines_from_bytes};
pub use buffer_utils::{CircularLineBuffer, SseFrame, SseFrameParser};
pub use openai::OpenAICompatClient;
pub use types::{Message, Role};
