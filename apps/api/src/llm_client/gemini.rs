//! Google Gemini `generateContent` adapter.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{split_system, ChatMessage, LlmError, Role, TextGenerator, REQUEST_TIMEOUT};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

// Sampling defaults shared by every agent.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.8;
const TOP_K: u32 = 40;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            model,
        })
    }

    /// The key travels in a header so it never appears in a URL.
    fn request(&self, api_key: &str, messages: &[ChatMessage]) -> RequestBuilder {
        self.client
            .post(format!(
                "{}/models/{}:generateContent",
                GEMINI_API_BASE, self.model
            ))
            .header(API_KEY_HEADER, api_key)
            .json(&Self::build_request(messages))
    }

    fn build_request(messages: &[ChatMessage]) -> GenerateContentRequest {
        let (system, turns) = split_system(messages);
        GenerateContentRequest {
            contents: turns
                .iter()
                .map(|m| Content {
                    role: Some(
                        match m.role {
                            Role::Assistant => "model",
                            _ => "user",
                        }
                        .to_string(),
                    ),
                    parts: vec![Part {
                        text: Some(m.content.clone()),
                    }],
                })
                .collect(),
            system_instruction: (!system.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part { text: Some(system) }],
            }),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential("gemini"))?;

        let response = self.request(api_key, messages).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: GenerateContentResponse = response.json().await?;
        let usage = api_response.usage_metadata.as_ref();
        debug!(
            model = %self.model,
            input_tokens = usage.and_then(|u| u.prompt_token_count).unwrap_or(0),
            output_tokens = usage.and_then(|u| u.candidates_token_count).unwrap_or(0),
            finish_reason = ?api_response.candidates.first().and_then(|c| c.finish_reason.as_deref()),
            "Gemini call succeeded"
        );

        let text = api_response.text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(None, DEFAULT_MODEL.to_string()).unwrap();
        let result = client.generate(&[ChatMessage::user("hello")]).await;
        assert!(matches!(result, Err(LlmError::MissingCredential("gemini"))));
    }

    #[test]
    fn test_api_key_is_sent_as_header_not_query() {
        let client = GeminiClient::new(Some("SECRETKEY123".to_string()), "m".to_string()).unwrap();
        let request = client
            .request("SECRETKEY123", &[ChatMessage::user("hello")])
            .build()
            .unwrap();
        assert!(!request.url().as_str().contains("SECRETKEY123"));
        assert!(request.url().query().is_none());
        assert_eq!(request.headers()[API_KEY_HEADER], "SECRETKEY123");
    }

    #[test]
    fn test_build_request_moves_system_to_instruction() {
        let request = GeminiClient::build_request(&[
            ChatMessage::system("You are an experienced career coach."),
            ChatMessage::user("How do I negotiate salary?"),
        ]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "You are an experienced career coach."
        );
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["topK"], 40);
    }

    #[test]
    fn test_response_text_reads_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Wear "}, {"text": "navy."}]}, "finishReason": "STOP"}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Wear navy.");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_empty());
    }
}
