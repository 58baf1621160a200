/// LLM Client: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Handlers and pipelines only see `dyn TextGenerator`.
///
/// Every call is a single round trip. There is no retry or backoff here:
/// a failed call surfaces exactly one error to the caller.
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod anthropic;
pub mod gemini;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;

/// Upper bound on a single upstream call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No API key configured for provider '{0}'")]
    MissingCredential(&'static str),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Strips the request URL so nothing carried in it reaches the logs.
impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Http(e.without_url())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a `(messages) -> text` generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The provider seam. Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the messages upstream once and returns the raw text of the reply.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    fn model(&self) -> &str;
}

/// Supported upstream providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Anthropic,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_MODEL,
            Provider::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(anyhow::anyhow!(
                "Unknown LLM_PROVIDER '{other}' (expected 'gemini' or 'anthropic')"
            )),
        }
    }
}

/// Builds the configured provider client.
pub fn build_generator(
    provider: Provider,
    model: String,
    api_key: Option<String>,
) -> Result<Arc<dyn TextGenerator>, LlmError> {
    Ok(match provider {
        Provider::Gemini => Arc::new(GeminiClient::new(api_key, model)?),
        Provider::Anthropic => Arc::new(AnthropicClient::new(api_key, model)?),
    })
}

/// Splits messages into the concatenated system text and the remaining turns.
pub(crate) fn split_system(messages: &[ChatMessage]) -> (String, Vec<&ChatMessage>) {
    let system = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    let turns = messages.iter().filter(|m| m.role != Role::System).collect();
    (system, turns)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
