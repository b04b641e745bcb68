//! Dump the raw SSE frames of one chat completion
//!
//! ```sh
//! FLOWCHAT_API_KEY=... cargo run -p flowchat-llm --example debug_frames -- "Hello"
//! ```

use anyhow::{Context, Result};
use flowchat_llm::{
    ChatCompletionRequest, ChatStreamClient, ClientConfig, Message, OpenAICompatClient,
    SseFrameParser,
};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("FLOWCHAT_API_KEY").context("FLOWCHAT_API_KEY is not set")?;
    let base_url = std::env::var("FLOWCHAT_API__BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3100/v1".to_string());
    let model = std::env::var("FLOWCHAT_API__MODEL").unwrap_or_else(|_| "mcu-dify".to_string());
    let prompt = std::env::args().nth(1).unwrap_or_else(|| "Hello".to_string());

    println!("=== Raw SSE frames ===\n");
    println!("Endpoint: {}", base_url);
    println!("Model: {}\n", model);

    let client = OpenAICompatClient::new(ClientConfig::new(base_url, api_key))?;
    let request = ChatCompletionRequest::new(model, vec![Message::user(prompt)]);

    let mut lines = client.stream_lines(&request).await?;
    let mut parser = SseFrameParser::new();
    let mut frames = 0;

    while let Some(line) = lines.next().await {
        let line = line?;
        println!("line  | {}", line);

        if let Some(frame) = parser.feed(&line) {
            frames += 1;
            println!("frame | #{} event={} data={}\n", frames, frame.event, frame.data);
        }
    }

    let dropped = parser.finish();

    println!("---");
    println!("Total frames: {}", frames);
    if dropped > 0 {
        println!("Dropped incomplete frame with {} data line(s)", dropped);
    }

    Ok(())
}
