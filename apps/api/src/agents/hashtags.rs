//! Structured hashtag generation. The model must answer with a JSON object;
//! anything else is reported as malformed output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::agents::catalog::AgentKind;
use crate::agents::lifecycle::GenerationSlots;
use crate::agents::output::parse_structured;
use crate::agents::pipeline::{save_history, tracked_call, validate_input, Caller};
use crate::agents::prompts::{HASHTAG_PROMPT_TEMPLATE, HASHTAG_SYSTEM};
use crate::agents::service::ServiceKind;
use crate::errors::AppError;
use crate::history::store::HistoryStore;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::models::history::NewHistoryRecord;

const DEFAULT_COUNT: u32 = 15;
const MAX_COUNT: u32 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct HashtagRequest {
    pub text: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_length")]
    pub length: String,
    #[serde(default)]
    pub count: Option<u32>,
}

fn default_platform() -> String {
    "instagram".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_length() -> String {
    "medium".to_string()
}

/// Exact shape the model is asked to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagSet {
    pub hashtags: Vec<String>,
    pub trending: Vec<String>,
    pub categories: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HashtagResponse {
    #[serde(flatten)]
    pub set: HashtagSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<Uuid>,
}

pub fn build_hashtag_messages(request: &HashtagRequest) -> Vec<ChatMessage> {
    let count = request.count.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT);
    let prompt = HASHTAG_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{platform}", request.platform.trim())
        .replace("{language}", request.language.trim())
        .replace("{length}", request.length.trim())
        .replace("{text}", &request.text);
    vec![
        ChatMessage::system(HASHTAG_SYSTEM),
        ChatMessage::system(JSON_ONLY_SYSTEM),
        ChatMessage::user(prompt),
    ]
}

pub async fn generate_hashtags(
    llm: &dyn TextGenerator,
    history: &dyn HistoryStore,
    slots: &GenerationSlots,
    user_id: Uuid,
    request: HashtagRequest,
) -> Result<HashtagResponse, AppError> {
    validate_input(&request.text)?;

    let agent = AgentKind::HashtagGenerator;
    let outcome = tracked_call(
        llm,
        slots,
        Caller::User(user_id),
        agent,
        &build_hashtag_messages(&request),
    )
    .await?;

    let set: HashtagSet = parse_structured(&outcome.text)?;
    info!(
        "Generated {} hashtags ({} trending) for user {user_id}",
        set.hashtags.len(),
        set.trending.len()
    );

    let history_id = if outcome.current {
        let output_text = serde_json::to_string(&set)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize hashtags: {e}")))?;
        let record = NewHistoryRecord {
            user_id,
            agent: agent.slug().to_string(),
            service: ServiceKind::HashtagGeneration.key().to_string(),
            input_text: request.text,
            context: serde_json::json!({
                "platform": request.platform,
                "language": request.language,
                "length": request.length,
            }),
            output_text,
        };
        save_history(history, record).await
    } else {
        None
    };

    Ok(HashtagResponse { set, history_id })
}
