//! Client for the text-understanding service.
//!
//! Wraps a single chat-completions request in the backoff combinator. The
//! service is an opaque prompt-in/text-out boundary; this is the unit that
//! tests replace with an HTTP fake.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::backoff::{RetryPolicy, retry_with_backoff};
use super::prompt::SYSTEM_PROMPT;

/// Default extraction endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default extraction model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Error types for extraction calls
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Transport-level failure (connection, timeout, decode)
    #[error("extraction request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected the prompt for exceeding its context window.
    /// Distinguished so the pipeline can retry once with reduced content.
    #[error("extraction service rejected the prompt as too large")]
    ContextTooLarge,

    /// Any other non-success response from the service
    #[error("extraction service returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// A success response that carried no usable message content
    #[error("extraction response carried no message content")]
    EmptyResponse,
}

impl ExtractionError {
    /// Whether the backoff combinator should retry this failure.
    /// Context overflow is deterministic; retrying it only delays the
    /// pipeline's content-reduction fallback.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::ContextTooLarge)
    }
}

/// Settings for the extraction service boundary.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub retry: RetryPolicy,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 4000,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Prompt-in/text-out client for the extraction service.
pub struct ExtractionClient {
    http: reqwest::Client,
    settings: ExtractionSettings,
}

impl ExtractionClient {
    pub fn new(settings: ExtractionSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, settings })
    }

    /// Send one prompt and return the trimmed response text, retrying
    /// transient failures per the configured policy. After the policy is
    /// exhausted the last error propagates to the caller.
    pub async fn extract(&self, prompt: &str) -> Result<String, ExtractionError> {
        retry_with_backoff(self.settings.retry, ExtractionError::is_transient, || {
            self.request(prompt)
        })
        .await
    }

    async fn request(&self, prompt: &str) -> Result<String, ExtractionError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if is_context_overflow(&message) {
                return Err(ExtractionError::ContextTooLarge);
            }
            return Err(ExtractionError::Service {
                status: status.as_u16(),
                message: truncate_message(&message),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ExtractionError::EmptyResponse)
    }
}

/// The service reports context overflow inside the error body; no
/// dedicated status code exists for it.
fn is_context_overflow(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("context_length_exceeded") || lower.contains("maximum context length")
}

/// Keep service error bodies log-friendly.
fn truncate_message(message: &str) -> String {
    const MAX: usize = 500;
    if message.len() <= MAX {
        message.to_string()
    } else {
        let mut end = MAX;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &message[..end])
    }
}
