// Client for OpenAI-compatible chat completion adapters

use crate::config::ClientConfig;
use crate::streaming::lines_from_bytes;
use crate::traits::{ChatCompletionRequest, ChatStreamClient, LineStream};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// OpenAI-compatible client (HTTP direct, no SDK)
pub struct OpenAICompatClient {
    http_client: reqwest::Client,
    completions_url: String,
}

impl OpenAICompatClient {
    /// Create new client; the bearer token is sent on every request
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            completions_url: config.completions_url(),
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

#[async_trait]
impl ChatStreamClient for OpenAICompatClient {
    async fn stream_lines(&self, request: &ChatCompletionRequest) -> Result<LineStream> {
        tracing::debug!(
            url = %self.completions_url,
            model = %request.model,
            messages = request.messages.len(),
            "Opening chat completion stream"
        );

        let response = self
            .http_client
            .post(&self.completions_url)
            .json(request)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completion API error ({}): {}", status, error_text);
        }

        Ok(lines_from_bytes(response.bytes_stream()))
    }
}
