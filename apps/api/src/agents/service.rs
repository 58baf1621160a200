//! Service kinds: the closed set of prompt templates an agent can select.
//!
//! Parsing is total: any key that is not a known template becomes
//! `ServiceKind::General`, so selection never fails at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ServiceKind {
    // Career coach
    CareerAdvice,
    ResumeTips,
    InterviewPrep,
    SkillGap,
    JobSearchStrategy,
    // Company research
    CompanyProfile,
    FinancialAnalysis,
    MarketPosition,
    CompetitorAnalysis,
    IndustryTrends,
    // Personal stylist
    FashionAdvice,
    OutfitRecommendations,
    WardrobeAnalysis,
    TrendAnalysis,
    ShoppingAssistance,
    // Single-purpose agents
    ResumeWriting,
    HashtagGeneration,
    PlagiarismScan,
    GrammarCheck,
    TestimonialRewrite,
    DocumentFormatting,
    ImageDescription,
    ContentWriting,
    DataAnalysis,
    SeoOptimization,
    CustomerSupport,
    MarketAnalysis,
    Translation,
    ResearchAnalysis,
    AcademicTutoring,
    CodeSolution,
    LeadGeneration,
    /// Fallback for keys without a template. Uses the agent's generic instruction.
    General,
}

impl ServiceKind {
    pub fn key(self) -> &'static str {
        match self {
            ServiceKind::CareerAdvice => "career-advice",
            ServiceKind::ResumeTips => "resume-tips",
            ServiceKind::InterviewPrep => "interview-prep",
            ServiceKind::SkillGap => "skill-gap",
            ServiceKind::JobSearchStrategy => "job-search",
            ServiceKind::CompanyProfile => "company-profile",
            ServiceKind::FinancialAnalysis => "financial-analysis",
            ServiceKind::MarketPosition => "market-position",
            ServiceKind::CompetitorAnalysis => "competitor-analysis",
            ServiceKind::IndustryTrends => "industry-trends",
            ServiceKind::FashionAdvice => "fashion-advice",
            ServiceKind::OutfitRecommendations => "outfit-recommendations",
            ServiceKind::WardrobeAnalysis => "wardrobe-analysis",
            ServiceKind::TrendAnalysis => "trend-analysis",
            ServiceKind::ShoppingAssistance => "shopping-assistance",
            ServiceKind::ResumeWriting => "resume-writing",
            ServiceKind::HashtagGeneration => "hashtag-generation",
            ServiceKind::PlagiarismScan => "plagiarism-scan",
            ServiceKind::GrammarCheck => "grammar-check",
            ServiceKind::TestimonialRewrite => "testimonial-rewrite",
            ServiceKind::DocumentFormatting => "document-formatting",
            ServiceKind::ImageDescription => "image-description",
            ServiceKind::ContentWriting => "content-writing",
            ServiceKind::DataAnalysis => "data-analysis",
            ServiceKind::SeoOptimization => "seo-optimization",
            ServiceKind::CustomerSupport => "customer-support",
            ServiceKind::MarketAnalysis => "market-analysis",
            ServiceKind::Translation => "translation",
            ServiceKind::ResearchAnalysis => "research-analysis",
            ServiceKind::AcademicTutoring => "academic-tutoring",
            ServiceKind::CodeSolution => "code-solution",
            ServiceKind::LeadGeneration => "lead-generation",
            ServiceKind::General => "general",
        }
    }

    /// Every variant with a dedicated template (excludes `General`).
    pub const KNOWN: [ServiceKind; 32] = [
        ServiceKind::CareerAdvice,
        ServiceKind::ResumeTips,
        ServiceKind::InterviewPrep,
        ServiceKind::SkillGap,
        ServiceKind::JobSearchStrategy,
        ServiceKind::CompanyProfile,
        ServiceKind::FinancialAnalysis,
        ServiceKind::MarketPosition,
        ServiceKind::CompetitorAnalysis,
        ServiceKind::IndustryTrends,
        ServiceKind::FashionAdvice,
        ServiceKind::OutfitRecommendations,
        ServiceKind::WardrobeAnalysis,
        ServiceKind::TrendAnalysis,
        ServiceKind::ShoppingAssistance,
        ServiceKind::ResumeWriting,
        ServiceKind::HashtagGeneration,
        ServiceKind::PlagiarismScan,
        ServiceKind::GrammarCheck,
        ServiceKind::TestimonialRewrite,
        ServiceKind::DocumentFormatting,
        ServiceKind::ImageDescription,
        ServiceKind::ContentWriting,
        ServiceKind::DataAnalysis,
        ServiceKind::SeoOptimization,
        ServiceKind::CustomerSupport,
        ServiceKind::MarketAnalysis,
        ServiceKind::Translation,
        ServiceKind::ResearchAnalysis,
        ServiceKind::AcademicTutoring,
        ServiceKind::CodeSolution,
        ServiceKind::LeadGeneration,
    ];

    /// Total parse: unknown or blank keys map to `General`.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        Self::KNOWN
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key))
            .unwrap_or(ServiceKind::General)
    }
}

impl From<String> for ServiceKind {
    fn from(key: String) -> Self {
        ServiceKind::from_key(&key)
    }
}

impl From<ServiceKind> for &'static str {
    fn from(kind: ServiceKind) -> Self {
        kind.key()
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_round_trip() {
        for kind in ServiceKind::KNOWN {
            assert_eq!(ServiceKind::from_key(kind.key()), kind);
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_general() {
        assert_eq!(ServiceKind::from_key("horoscope"), ServiceKind::General);
        assert_eq!(ServiceKind::from_key(""), ServiceKind::General);
    }

    #[test]
    fn test_from_key_ignores_case_and_whitespace() {
        assert_eq!(
            ServiceKind::from_key("  Interview-Prep "),
            ServiceKind::InterviewPrep
        );
    }

    #[test]
    fn test_deserialize_never_fails_on_unknown_key() {
        let kind: ServiceKind = serde_json::from_str("\"quantum-astrology\"").unwrap();
        assert_eq!(kind, ServiceKind::General);
    }

    #[test]
    fn test_serializes_as_key() {
        let json = serde_json::to_string(&ServiceKind::CompanyProfile).unwrap();
        assert_eq!(json, "\"company-profile\"");
    }

    #[test]
    fn test_known_excludes_general() {
        assert!(!ServiceKind::KNOWN.contains(&ServiceKind::General));
    }
}
