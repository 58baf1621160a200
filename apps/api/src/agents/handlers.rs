use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::agents::catalog::{catalog, AgentCard, AgentKind};
use crate::agents::hashtags::{generate_hashtags, HashtagRequest, HashtagResponse};
use crate::agents::hiring::Hire;
use crate::agents::lifecycle::{GenerationState, SlotKey};
use crate::agents::pipeline::{run_generation, Caller, GenerationRequest, GenerationResponse};
use crate::auth::{AuthUser, MaybeAuthUser};
use crate::errors::AppError;
use crate::models::hired_agent::HiredAgent;
use crate::profile::style::load_style_preferences;
use crate::state::AppState;

fn parse_agent(slug: &str) -> Result<AgentKind, AppError> {
    AgentKind::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("Unknown agent '{slug}'")))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub agent: AgentKind,
    #[serde(flatten)]
    pub state: GenerationState,
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/agents
pub async fn handle_list_agents() -> Json<Vec<AgentCard>> {
    Json(catalog())
}

/// GET /api/v1/agents/:agent
pub async fn handle_get_agent(Path(slug): Path<String>) -> Result<Json<AgentCard>, AppError> {
    Ok(Json(parse_agent(&slug)?.card()))
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/agents/:agent/generate
/// Signing in is optional. Anonymous results are returned but not saved.
pub async fn handle_generate(
    State(state): State<AppState>,
    MaybeAuthUser(auth): MaybeAuthUser,
    Path(slug): Path<String>,
    Json(mut request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    let agent = parse_agent(&slug)?;

    let caller = match &auth {
        Some(user) => Caller::User(user.user_id),
        None => Caller::Anonymous,
    };

    if let (AgentKind::PersonalStylist, Some(user)) = (agent, &auth) {
        if let Some(prefs) = load_style_preferences(&state.db, user.user_id).await? {
            prefs.merge_into(&mut request.context);
        }
    }

    let response = run_generation(
        state.llm.as_ref(),
        state.history.as_ref(),
        &state.slots,
        caller,
        agent,
        request,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/agents/:agent/status
pub async fn handle_generation_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let agent = parse_agent(&slug)?;
    let slot_state = state.slots.state(&SlotKey::new(auth.user_id, agent));
    Ok(Json(StatusResponse {
        agent,
        state: slot_state,
    }))
}

/// POST /api/v1/hashtags
pub async fn handle_hashtags(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<HashtagRequest>,
) -> Result<Json<HashtagResponse>, AppError> {
    let response = generate_hashtags(
        state.llm.as_ref(),
        state.history.as_ref(),
        &state.slots,
        auth.user_id,
        request,
    )
    .await?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Hiring
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/agents/:agent/hire
/// Hiring an agent twice returns the existing record with 200.
pub async fn handle_hire_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> Result<(StatusCode, Json<HiredAgent>), AppError> {
    let agent = parse_agent(&slug)?;
    Ok(match state.hired_agents.hire(auth.user_id, agent).await? {
        Hire::Created(hired) => (StatusCode::CREATED, Json(hired)),
        Hire::Existing(hired) => (StatusCode::OK, Json(hired)),
    })
}

/// GET /api/v1/me/agents
pub async fn handle_list_hired_agents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<HiredAgent>>, AppError> {
    Ok(Json(state.hired_agents.list(auth.user_id).await?))
}

/// DELETE /api/v1/me/agents/:id
pub async fn handle_release_agent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.hired_agents.release(auth.user_id, id).await? {
        return Err(AppError::NotFound(format!("Hired agent {id} not found")));
    }
    info!("User {} released hired agent {id}", auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}
