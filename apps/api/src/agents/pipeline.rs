//! Generation pipeline.
//!
//! Flow: validate input → select service → compose prompt → lifecycle begin →
//!       one upstream call → lifecycle finish → persist (signed-in, current only).
//!
//! There is exactly one upstream call per request and no retry. Validation
//! failures happen before the call, so they never reach the provider.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::agents::catalog::AgentKind;
use crate::agents::lifecycle::{GenerationSlots, SlotKey, Ticket};
use crate::agents::output::GenerationResult;
use crate::agents::router::{compose, select_service, AuxiliaryContext};
use crate::agents::service::ServiceKind;
use crate::errors::AppError;
use crate::history::store::HistoryStore;
use crate::llm_client::{ChatMessage, TextGenerator};
use crate::models::history::NewHistoryRecord;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/v1/agents/:agent/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    #[serde(alias = "rawInput", alias = "prompt")]
    pub raw_input: String,
    /// Absent selects the agent's default service; unknown keys select `General`.
    #[serde(default, alias = "serviceKind", alias = "service_kind")]
    pub service: Option<ServiceKind>,
    #[serde(default)]
    pub context: AuxiliaryContext,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub agent: AgentKind,
    pub service: ServiceKind,
    #[serde(flatten)]
    pub result: GenerationResult,
    pub seq: u64,
    /// A newer submit for the same slot superseded this one.
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<Uuid>,
}

/// Who is generating. Anonymous callers are served but nothing is saved.
#[derive(Debug, Clone, Copy)]
pub enum Caller {
    Anonymous,
    User(Uuid),
}

impl Caller {
    fn user_id(self) -> Option<Uuid> {
        match self {
            Caller::Anonymous => None,
            Caller::User(id) => Some(id),
        }
    }

    fn slot(self, agent: AgentKind) -> SlotKey {
        SlotKey::new(self.user_id().unwrap_or_else(Uuid::new_v4), agent)
    }
}

/// Outcome of a single tracked upstream call.
pub(crate) struct CallOutcome {
    pub text: String,
    pub ticket: Ticket,
    pub current: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Rejects empty or whitespace-only input.
pub fn validate_input(raw_input: &str) -> Result<(), AppError> {
    if raw_input.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter some text before generating".to_string(),
        ));
    }
    Ok(())
}

pub async fn run_generation(
    llm: &dyn TextGenerator,
    history: &dyn HistoryStore,
    slots: &GenerationSlots,
    caller: Caller,
    agent: AgentKind,
    request: GenerationRequest,
) -> Result<GenerationResponse, AppError> {
    validate_input(&request.raw_input)?;

    let service = select_service(agent, request.service);
    let prompt = compose(agent, service, &request.raw_input, &request.context);
    info!(
        "Generating with {} ({}) via {}",
        agent.slug(),
        service,
        llm.model()
    );

    let outcome = tracked_call(llm, slots, caller, agent, &prompt.to_messages()).await?;

    let history_id = match caller.user_id() {
        Some(user_id) if outcome.current => {
            let record = NewHistoryRecord {
                user_id,
                agent: agent.slug().to_string(),
                service: service.key().to_string(),
                input_text: request.raw_input,
                context: serde_json::to_value(&request.context).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Failed to serialize context: {e}"))
                })?,
                output_text: outcome.text.clone(),
            };
            save_history(history, record).await
        }
        _ => None,
    };

    Ok(GenerationResponse {
        agent,
        service,
        result: GenerationResult::from_text(outcome.text),
        seq: outcome.ticket.seq,
        stale: !outcome.current,
        history_id,
    })
}

/// Persists a finished generation. A store failure is logged and the
/// result is still returned, without a history id.
pub(crate) async fn save_history(
    history: &dyn HistoryStore,
    record: NewHistoryRecord,
) -> Option<Uuid> {
    let user_id = record.user_id;
    let agent = record.agent.clone();
    match history.insert(record).await {
        Ok(saved) => Some(saved.id),
        Err(e) => {
            error!("Failed to save {agent} history for user {user_id}: {e}");
            None
        }
    }
}

/// Runs one upstream call inside the caller's lifecycle slot.
/// Upstream failures of any kind map to `AppError::Llm`.
pub(crate) async fn tracked_call(
    llm: &dyn TextGenerator,
    slots: &GenerationSlots,
    caller: Caller,
    agent: AgentKind,
    messages: &[ChatMessage],
) -> Result<CallOutcome, AppError> {
    let key = caller.slot(agent);
    let ticket = slots.begin(key);

    let result = llm.generate(messages).await;
    let current = slots.finish(key, ticket, result.is_ok());
    if matches!(caller, Caller::Anonymous) {
        slots.release(&key);
    }

    let text = result.map_err(|e| AppError::Llm(e.to_string()))?;
    if !current {
        warn!(
            "Discarding stale {} response seq={} (a newer request is in flight)",
            agent.slug(),
            ticket.seq
        );
    }

    Ok(CallOutcome {
        text,
        ticket,
        current,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{ChatMessage, LlmError, TextGenerator};

    /// Records every call and answers with a fixed reply or failure.
    pub struct CountingGenerator {
        reply: Result<String, u16>,
        pub calls: AtomicUsize,
        pub last_messages: Mutex<Vec<ChatMessage>>,
    }

    impl CountingGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages.to_vec();
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream rejected the request".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "counting"
        }
    }
}
