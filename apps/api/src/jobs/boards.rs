//! Job boards. LinkedIn is queried live; ZipRecruiter and Glassdoor return
//! sample postings until real integrations exist.
//!
//! `AppState` holds the boards as `Arc<dyn JobBoard>` in display order.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::REQUEST_TIMEOUT;

const LINKEDIN_SEARCH_URL: &str = "https://api.linkedin.com/v2/jobSearch";
const LINKEDIN_RESULT_LIMIT: u32 = 10;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("No API key configured for {0}")]
    MissingCredential(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{board} API error (status {status}): {message}")]
    Api {
        board: &'static str,
        status: u16,
        message: String,
    },
}

/// A posting as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    /// Filled in by the match scorer.
    #[serde(default)]
    pub match_percentage: u8,
}

#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub keywords: String,
    pub location: Option<String>,
}

impl JobQuery {
    fn location_or_remote(&self) -> String {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or("Remote")
            .to_string()
    }
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Display name, also matched (case-insensitively) against the platform filter.
    fn name(&self) -> &'static str;

    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, BoardError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LinkedIn
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LinkedInResponse {
    #[serde(default)]
    elements: Vec<LinkedInJob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkedInJob {
    title: Option<LinkedInText>,
    company_details: Option<LinkedInCompanyDetails>,
    formatted_location: Option<String>,
    description: Option<LinkedInText>,
    apply_url: Option<String>,
    entity_urn: Option<String>,
    application_settings: Option<LinkedInApplicationSettings>,
}

#[derive(Debug, Deserialize)]
struct LinkedInText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkedInCompanyDetails {
    company: Option<LinkedInCompany>,
}

#[derive(Debug, Deserialize)]
struct LinkedInCompany {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkedInApplicationSettings {
    email: Option<String>,
}

fn text_or(value: Option<LinkedInText>, fallback: &str) -> String {
    value
        .and_then(|t| t.text)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl LinkedInJob {
    fn into_posting(self, query: &JobQuery) -> JobPosting {
        let url = self.apply_url.unwrap_or_else(|| {
            let id = self
                .entity_urn
                .as_deref()
                .and_then(|urn| urn.rsplit(':').next())
                .unwrap_or_default();
            format!("https://www.linkedin.com/jobs/view/{id}")
        });
        JobPosting {
            title: text_or(self.title, "No Title"),
            company: self
                .company_details
                .and_then(|d| d.company)
                .and_then(|c| c.name)
                .unwrap_or_else(|| "Company Not Listed".to_string()),
            location: self
                .formatted_location
                .unwrap_or_else(|| query.location_or_remote()),
            description: text_or(self.description, "No Description Available"),
            url,
            source: "LinkedIn".to_string(),
            contact_info: self.application_settings.and_then(|s| s.email),
            match_percentage: 0,
        }
    }
}

pub struct LinkedInBoard {
    client: Client,
    api_key: Option<String>,
}

impl LinkedInBoard {
    pub fn new(api_key: Option<String>) -> Result<Self, BoardError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
        })
    }
}

#[async_trait]
impl JobBoard for LinkedInBoard {
    fn name(&self) -> &'static str {
        "LinkedIn"
    }

    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, BoardError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(BoardError::MissingCredential("LinkedIn"))?;

        let limit = LINKEDIN_RESULT_LIMIT.to_string();
        let location = query.location.clone().unwrap_or_default();
        let response = self
            .client
            .get(LINKEDIN_SEARCH_URL)
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .header("X-Restli-Protocol-Version", "2.0.0")
            .query(&[
                ("keywords", query.keywords.as_str()),
                ("location", location.as_str()),
                ("remoteFilter", "REMOTE"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::Api {
                board: "LinkedIn",
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: LinkedInResponse = response.json().await?;
        debug!("LinkedIn returned {} elements", body.elements.len());
        Ok(body
            .elements
            .into_iter()
            .map(|job| job.into_posting(query))
            .collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sample boards
// ────────────────────────────────────────────────────────────────────────────

/// Board that answers every query with one canned posting.
pub struct SampleBoard {
    name: &'static str,
    url: &'static str,
    contact: &'static str,
}

impl SampleBoard {
    pub fn zip_recruiter() -> Self {
        Self {
            name: "ZipRecruiter",
            url: "https://ziprecruiter.com/jobs/",
            contact: "hr@company.com",
        }
    }

    pub fn glassdoor() -> Self {
        Self {
            name: "Glassdoor",
            url: "https://glassdoor.com/jobs/",
            contact: "careers@company.com",
        }
    }
}

#[async_trait]
impl JobBoard for SampleBoard {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, BoardError> {
        info!("Searching {} (sample data) for '{}'", self.name, query.keywords);
        Ok(vec![JobPosting {
            title: format!("Sample {} Job", self.name),
            company: format!("{} Company", self.name),
            location: query.location_or_remote(),
            description: format!("This is a sample job posting from {}", self.name),
            url: self.url.to_string(),
            source: self.name.to_string(),
            contact_info: Some(self.contact.to_string()),
            match_percentage: 0,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_board_defaults_location_to_remote() {
        let board = SampleBoard::glassdoor();
        let jobs = board
            .search(&JobQuery {
                keywords: "rust".to_string(),
                location: Some("  ".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].location, "Remote");
        assert_eq!(jobs[0].source, "Glassdoor");
    }

    #[tokio::test]
    async fn test_linkedin_without_key_fails_without_network() {
        let board = LinkedInBoard::new(None).unwrap();
        let result = board.search(&JobQuery::default()).await;
        assert!(matches!(result, Err(BoardError::MissingCredential("LinkedIn"))));
    }

    #[test]
    fn test_linkedin_element_maps_to_posting() {
        let json = r#"{
            "elements": [
                {
                    "title": {"text": "Backend Engineer"},
                    "companyDetails": {"company": {"name": "Acme"}},
                    "description": {"text": "Rust and Postgres"},
                    "entityUrn": "urn:li:jobPosting:12345",
                    "applicationSettings": {"email": "jobs@acme.io"}
                },
                {}
            ]
        }"#;
        let body: LinkedInResponse = serde_json::from_str(json).unwrap();
        let query = JobQuery {
            keywords: "rust".to_string(),
            location: Some("Berlin".to_string()),
        };
        let jobs: Vec<_> = body
            .elements
            .into_iter()
            .map(|j| j.into_posting(&query))
            .collect();

        assert_eq!(jobs[0].title, "Backend Engineer");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].location, "Berlin");
        assert_eq!(jobs[0].url, "https://www.linkedin.com/jobs/view/12345");
        assert_eq!(jobs[0].contact_info.as_deref(), Some("jobs@acme.io"));

        assert_eq!(jobs[1].title, "No Title");
        assert_eq!(jobs[1].company, "Company Not Listed");
        assert_eq!(jobs[1].description, "No Description Available");
    }
}
