use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::search::{search_jobs, JobSearchRequest, JobSearchResponse};
use crate::models::saved_job::{NewSavedJob, SavedJob};
use crate::state::AppState;

/// POST /api/v1/jobs/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let response = search_jobs(&state.job_boards, state.match_scorer.as_ref(), &req).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct SaveJobRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: String,
    #[serde(alias = "source")]
    pub platform: String,
    #[serde(default, alias = "matchPercentage")]
    pub match_percentage: Option<u8>,
    pub notes: Option<String>,
}

impl SaveJobRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("title", &self.title),
            ("company", &self.company),
            ("url", &self.url),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} is required")));
            }
        }
        if self.match_percentage.is_some_and(|m| m > 100) {
            return Err(AppError::Validation(
                "match_percentage must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

impl SaveJobRequest {
    fn into_new_job(self, user_id: Uuid) -> NewSavedJob {
        NewSavedJob {
            user_id,
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location,
            url: self.url.trim().to_string(),
            platform: self.platform.trim().to_string(),
            match_percentage: self.match_percentage.unwrap_or(0),
            notes: self.notes,
        }
    }
}

/// POST /api/v1/jobs/saved
pub async fn handle_save_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SaveJobRequest>,
) -> Result<(StatusCode, Json<SavedJob>), AppError> {
    req.validate()?;
    let row = state.saved_jobs.save(req.into_new_job(auth.user_id)).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs/saved
pub async fn handle_list_saved_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<SavedJob>>, AppError> {
    Ok(Json(state.saved_jobs.list(auth.user_id).await?))
}

/// DELETE /api/v1/jobs/saved/:id
pub async fn handle_delete_saved_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.saved_jobs.delete(auth.user_id, id).await? {
        return Err(AppError::NotFound(format!("Saved job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SaveJobRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Backend Engineer",
            "company": "Acme",
            "url": "https://example.com/jobs/1",
            "source": "Glassdoor",
            "match_percentage": 80
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request();
        assert_eq!(req.platform, "Glassdoor");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let mut req = request();
        req.company = " ".to_string();
        assert!(matches!(req.validate(), Err(AppError::Validation(m)) if m.contains("company")));
    }

    #[test]
    fn test_out_of_range_match_is_rejected() {
        let mut req = request();
        req.match_percentage = Some(140);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_new_job_is_trimmed_and_match_defaults_to_zero() {
        let mut req = request();
        req.title = "  Backend Engineer\n".to_string();
        req.match_percentage = None;
        let user_id = Uuid::new_v4();
        let job = req.into_new_job(user_id);
        assert_eq!(job.user_id, user_id);
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.match_percentage, 0);
    }
}
