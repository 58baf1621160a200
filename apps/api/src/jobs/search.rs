//! Job search: query → boards → score → sort → analysis.
//!
//! A board that fails is logged and skipped; the search still answers
//! with whatever the other boards returned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::analysis::{build_analysis, ProfileLinks};
use crate::jobs::boards::{JobBoard, JobPosting, JobQuery};
use crate::jobs::matching::MatchScorer;

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchRequest {
    #[serde(default, alias = "jobPlatform")]
    pub job_platform: Option<String>,
    pub keywords: String,
    #[serde(default, alias = "jobType")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "resumeContent")]
    pub resume_content: Option<String>,
    #[serde(default, alias = "linkedinUrl")]
    pub linkedin_url: Option<String>,
    #[serde(default, alias = "githubUrl")]
    pub github_url: Option<String>,
    #[serde(default, alias = "portfolioUrl")]
    pub portfolio_url: Option<String>,
}

impl JobSearchRequest {
    fn platform(&self) -> Option<&str> {
        self.job_platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobPosting>,
    /// Summary, `---`, then the detailed listing.
    pub analysis: String,
    /// Boards that failed and were skipped.
    pub skipped_boards: Vec<&'static str>,
}

pub async fn search_jobs(
    boards: &[Arc<dyn JobBoard>],
    scorer: &dyn MatchScorer,
    request: &JobSearchRequest,
) -> Result<JobSearchResponse, AppError> {
    if request.keywords.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter keywords to search for".to_string(),
        ));
    }

    let platform = request.platform();
    let query = JobQuery {
        keywords: request.keywords.trim().to_string(),
        location: request.location.clone(),
    };

    let mut jobs = Vec::new();
    let mut skipped_boards = Vec::new();
    for board in boards
        .iter()
        .filter(|b| platform.map_or(true, |p| b.name().eq_ignore_ascii_case(p)))
    {
        match board.search(&query).await {
            Ok(found) => {
                info!("Retrieved {} jobs from {}", found.len(), board.name());
                jobs.extend(found);
            }
            Err(e) => {
                warn!("Skipping {}: {e}", board.name());
                skipped_boards.push(board.name());
            }
        }
    }

    let resume = request.resume_content.as_deref();
    for job in &mut jobs {
        job.match_percentage = scorer.score(job, resume).await;
    }
    // Stable sort keeps board order among equal scores.
    jobs.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));

    let analysis = build_analysis(
        &jobs,
        platform,
        &query.keywords,
        request.job_type.as_deref(),
        ProfileLinks {
            linkedin: request.linkedin_url.as_deref(),
            github: request.github_url.as_deref(),
            portfolio: request.portfolio_url.as_deref(),
        },
    );

    Ok(JobSearchResponse {
        jobs,
        analysis,
        skipped_boards,
    })
}
