/// Text-completion client
///
/// The summary endpoint talks to the completion service through the
/// [`CompletionClient`] trait. The production implementation,
/// [`OpenAiClient`], speaks the OpenAI-compatible chat completions API; tests
/// substitute their own implementation.
///
/// The client is built once at startup and shared, so there is no
/// per-request construction and no retry: one request, one response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Client could not be constructed
    #[error("Invalid completion client configuration: {0}")]
    Configuration(String),

    /// Transport failure or timeout
    #[error("Completion request failed: {0}")]
    Request(String),

    /// Service answered with a non-success status
    #[error("Completion service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// Response body didn't match the expected shape
    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),
}

/// A single chat completion: one system message, one user message
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,

    pub prompt: String,

    pub max_tokens: u32,

    pub temperature: f32,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the first choice's text, or None if the service sent none
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError>;
}

/// Connection settings for [`OpenAiClient`]
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,

    /// e.g. `https://api.openai.com/v1`
    pub base_url: String,

    pub model: String,

    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::Configuration("API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Configuration(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError> {
        let body = ChatCompletionBody {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(model = %self.config.model, "Sending chat completion request");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
