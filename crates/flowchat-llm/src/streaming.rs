use std::error::Error as StdError;

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::buffer_utils::CircularLineBuffer;
use crate::traits::LineStream;

/// OpenAI-style streaming chunk
///
/// Every level is optional on the wire; missing pieces decode to their
/// defaults so `content()` never fails on a well-formed JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatStreamChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: Delta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatStreamChunk {
    /// Text fragment of the first choice, empty when absent at any level
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

/// Split a chunked response body into text lines
///
/// Lines are yielded as soon as their newline arrives. A trailing line
/// without a newline is yielded once the body ends. Invalid UTF-8 is
/// replaced, not fatal. A transport error ends the stream with an error item.
pub fn lines_from_bytes<S, B, E>(byte_chunks: S) -> LineStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: StdError + Send + Sync + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(byte_chunks);
        let mut buffer = CircularLineBuffer::with_capacity(8192);

        while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes.as_ref());

                    while let Some(line) = buffer.next_line() {
                        yield Ok(line);
                    }
                }
                Err(e) => {
                    yield Err(anyhow::Error::new(e).context("Stream error"));
                    return;
                }
            }
        }

        if let Some(line) = buffer.take_remainder() {
            yield Ok(line);
        }
    })
}
