//! Match scoring: how well a posting fits the caller's resume.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, deterministic, no network).
//! `AppState` holds an `Arc<dyn MatchScorer>`, so a semantic scorer can be
//! swapped in without touching the search handler.

use async_trait::async_trait;

use crate::jobs::boards::JobPosting;

/// Keywords whose joint presence in posting and resume raises the score.
pub const MATCH_KEYWORDS: [&str; 4] = ["javascript", "react", "typescript", "node"];

/// Score when no resume was supplied.
pub const NO_RESUME_SCORE: u8 = 70;
const BASE_SCORE: u32 = 60;
const PER_KEYWORD: u32 = 10;

#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Returns a percentage in 0..=100.
    async fn score(&self, posting: &JobPosting, resume: Option<&str>) -> u8;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. No (or blank) resume → 70.
/// 2. n = keywords found in both description and resume, case-insensitively.
/// 3. score = min(100, 60 + 10·n)
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(&self, posting: &JobPosting, resume: Option<&str>) -> u8 {
        keyword_match(&posting.description, resume)
    }
}

pub fn keyword_match(description: &str, resume: Option<&str>) -> u8 {
    let Some(resume) = resume.filter(|r| !r.trim().is_empty()) else {
        return NO_RESUME_SCORE;
    };

    let description = description.to_lowercase();
    let resume = resume.to_lowercase();
    let matches = MATCH_KEYWORDS
        .iter()
        .filter(|kw| description.contains(*kw) && resume.contains(*kw))
        .count() as u32;

    (BASE_SCORE + matches * PER_KEYWORD).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_resume_scores_seventy() {
        assert_eq!(keyword_match("React and Node", None), 70);
        assert_eq!(keyword_match("React and Node", Some("   ")), 70);
    }

    #[test]
    fn test_keywords_must_appear_in_both() {
        // react in both, node only in the posting
        assert_eq!(keyword_match("React and Node", Some("I write react")), 70);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            keyword_match("JAVASCRIPT, TypeScript", Some("javascript typescript")),
            80
        );
    }

    #[test]
    fn test_all_keywords_cap_at_hundred() {
        let text = "javascript react typescript node";
        assert_eq!(keyword_match(text, Some(text)), 100);
    }

    #[test]
    fn test_no_overlap_scores_base() {
        assert_eq!(keyword_match("Rust systems role", Some("javascript")), 60);
    }

    #[tokio::test]
    async fn test_scorer_reads_description() {
        let posting = JobPosting {
            title: "Frontend".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: "React, TypeScript".to_string(),
            url: "https://example.com".to_string(),
            source: "Glassdoor".to_string(),
            contact_info: None,
            match_percentage: 0,
        };
        let score = KeywordMatchScorer
            .score(&posting, Some("typescript react"))
            .await;
        assert_eq!(score, 80);
    }
}
