use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::history::HistoryRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Agent slug, e.g. `career-coach`.
    pub agent: Option<String>,
}

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryRecord>>, AppError> {
    let agent = query.agent.as_deref().map(str::trim).filter(|a| !a.is_empty());
    let records = state.history.list(auth.user_id, agent).await?;
    Ok(Json(records))
}

/// GET /api/v1/history/:id
pub async fn handle_get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryRecord>, AppError> {
    state
        .history
        .get(auth.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("History entry {id} not found")))
}

/// DELETE /api/v1/history/:id
pub async fn handle_delete_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.history.delete(auth.user_id, id).await? {
        return Err(AppError::NotFound(format!("History entry {id} not found")));
    }
    info!("Deleted history entry {id} for user {}", auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}
