pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::agents::handlers as agents;
use crate::auth::handlers as auth;
use crate::history::handlers as history;
use crate::jobs::handlers as jobs;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::storage::handlers as uploads;
use crate::storage::UPLOAD_BODY_LIMIT;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/v1/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/v1/auth/sign-out", post(auth::handle_sign_out))
        .route("/api/v1/auth/session", get(auth::handle_session))
        // Agents
        .route("/api/v1/agents", get(agents::handle_list_agents))
        .route("/api/v1/agents/:agent", get(agents::handle_get_agent))
        .route(
            "/api/v1/agents/:agent/generate",
            post(agents::handle_generate),
        )
        .route(
            "/api/v1/agents/:agent/status",
            get(agents::handle_generation_status),
        )
        .route("/api/v1/agents/:agent/hire", post(agents::handle_hire_agent))
        .route("/api/v1/me/agents", get(agents::handle_list_hired_agents))
        .route(
            "/api/v1/me/agents/:id",
            delete(agents::handle_release_agent),
        )
        .route("/api/v1/hashtags", post(agents::handle_hashtags))
        // History
        .route("/api/v1/history", get(history::handle_list_history))
        .route(
            "/api/v1/history/:id",
            get(history::handle_get_history).delete(history::handle_delete_history),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_update_profile),
        )
        .route(
            "/api/v1/profile/style-preferences",
            get(profile::handle_get_style_preferences).put(profile::handle_put_style_preferences),
        )
        // Jobs
        .route("/api/v1/jobs/search", post(jobs::handle_search))
        .route(
            "/api/v1/jobs/saved",
            get(jobs::handle_list_saved_jobs).post(jobs::handle_save_job),
        )
        .route(
            "/api/v1/jobs/saved/:id",
            delete(jobs::handle_delete_saved_job),
        )
        // Uploads
        .route("/api/v1/uploads", get(uploads::handle_list_uploads))
        .route(
            "/api/v1/uploads/:kind",
            post(uploads::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
