use std::sync::Arc;

use sqlx::PgPool;

use crate::agents::hiring::HiredAgentStore;
use crate::agents::lifecycle::GenerationSlots;
use crate::auth::sessions::RevocationList;
use crate::auth::tokens::TokenIssuer;
use crate::history::store::HistoryStore;
use crate::jobs::boards::JobBoard;
use crate::jobs::matching::MatchScorer;
use crate::jobs::saved::SavedJobStore;
use crate::llm_client::TextGenerator;
use crate::storage::uploads::UploadStore;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client is built once in `main`; nothing here is a global.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub objects: Arc<dyn ObjectStore>,
    pub uploads: Arc<dyn UploadStore>,
    pub llm: Arc<dyn TextGenerator>,
    pub history: Arc<dyn HistoryStore>,
    pub hired_agents: Arc<dyn HiredAgentStore>,
    pub saved_jobs: Arc<dyn SavedJobStore>,
    /// Per-(user, agent) lifecycle slots for stale-response detection.
    pub slots: Arc<GenerationSlots>,
    pub tokens: TokenIssuer,
    pub revocations: Arc<dyn RevocationList>,
    /// Boards queried by job search, in display order.
    pub job_boards: Arc<[Arc<dyn JobBoard>]>,
    /// Pluggable resume/posting scorer. Default: `KeywordMatchScorer`.
    pub match_scorer: Arc<dyn MatchScorer>,
}
