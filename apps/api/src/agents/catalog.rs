//! Marketplace catalog: every agent a user can open, hire, or generate with.

use serde::{Deserialize, Serialize};

use crate::agents::prompts;
use crate::agents::service::ServiceKind;

/// A marketplace agent. The slug is the public identifier used in routes
/// and stored in `hired_agents` / `generation_history`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    CompanyResearch,
    PersonalStylist,
    CareerCoach,
    ResumeBuilder,
    HashtagGenerator,
    PlagiarismChecker,
    GrammarChecker,
    TestimonialTransformer,
    DocumentFormatter,
    ImageGenerator,
    ContentWriter,
    DataAnalyzer,
    SeoOptimizer,
    CustomerServiceBot,
    MarketAnalyst,
    TranslationExpert,
    ResearchAssistant,
    AcademicAssistant,
    CodeAssistant,
    LeadGenerator,
    JobSearch,
}

/// Public catalog card for an agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentCard {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub path: String,
    pub services: Vec<&'static str>,
}

impl AgentKind {
    pub const ALL: [AgentKind; 21] = [
        AgentKind::CompanyResearch,
        AgentKind::PersonalStylist,
        AgentKind::CareerCoach,
        AgentKind::ResumeBuilder,
        AgentKind::HashtagGenerator,
        AgentKind::PlagiarismChecker,
        AgentKind::GrammarChecker,
        AgentKind::TestimonialTransformer,
        AgentKind::DocumentFormatter,
        AgentKind::ImageGenerator,
        AgentKind::ContentWriter,
        AgentKind::DataAnalyzer,
        AgentKind::SeoOptimizer,
        AgentKind::CustomerServiceBot,
        AgentKind::MarketAnalyst,
        AgentKind::TranslationExpert,
        AgentKind::ResearchAssistant,
        AgentKind::AcademicAssistant,
        AgentKind::CodeAssistant,
        AgentKind::LeadGenerator,
        AgentKind::JobSearch,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            AgentKind::CompanyResearch => "company-research",
            AgentKind::PersonalStylist => "personal-stylist",
            AgentKind::CareerCoach => "career-coach",
            AgentKind::ResumeBuilder => "resume-builder",
            AgentKind::HashtagGenerator => "hashtag-generator",
            AgentKind::PlagiarismChecker => "plagiarism-checker",
            AgentKind::GrammarChecker => "grammar-checker",
            AgentKind::TestimonialTransformer => "testimonial-transformer",
            AgentKind::DocumentFormatter => "document-formatter",
            AgentKind::ImageGenerator => "image-generator",
            AgentKind::ContentWriter => "content-writer",
            AgentKind::DataAnalyzer => "data-analyzer",
            AgentKind::SeoOptimizer => "seo-optimizer",
            AgentKind::CustomerServiceBot => "customer-service-bot",
            AgentKind::MarketAnalyst => "market-analyst",
            AgentKind::TranslationExpert => "translation-expert",
            AgentKind::ResearchAssistant => "research-assistant",
            AgentKind::AcademicAssistant => "academic-assistant",
            AgentKind::CodeAssistant => "code-assistant",
            AgentKind::LeadGenerator => "lead-generator",
            AgentKind::JobSearch => "job-search",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.slug() == slug)
    }

    pub fn name(self) -> &'static str {
        match self {
            AgentKind::CompanyResearch => "Company Research",
            AgentKind::PersonalStylist => "Personal Stylist",
            AgentKind::CareerCoach => "Career Coach",
            AgentKind::ResumeBuilder => "Resume Builder",
            AgentKind::HashtagGenerator => "Hashtag Generator",
            AgentKind::PlagiarismChecker => "Plagiarism Checker",
            AgentKind::GrammarChecker => "Grammar Checker",
            AgentKind::TestimonialTransformer => "Testimonial Transformer",
            AgentKind::DocumentFormatter => "Document Formatter",
            AgentKind::ImageGenerator => "Image Generator",
            AgentKind::ContentWriter => "Content Writer",
            AgentKind::DataAnalyzer => "Data Analyzer",
            AgentKind::SeoOptimizer => "SEO Optimizer",
            AgentKind::CustomerServiceBot => "Customer Service Bot",
            AgentKind::MarketAnalyst => "Market Analyst",
            AgentKind::TranslationExpert => "Translation Expert",
            AgentKind::ResearchAssistant => "Research Assistant",
            AgentKind::AcademicAssistant => "Academic Assistant",
            AgentKind::CodeAssistant => "Code Assistant",
            AgentKind::LeadGenerator => "Lead Generator",
            AgentKind::JobSearch => "Job Search",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgentKind::CompanyResearch => "Comprehensive company and market analysis",
            AgentKind::PersonalStylist => "AI-powered fashion advice and outfit recommendations",
            AgentKind::CareerCoach => "Career advice, resume feedback and interview preparation",
            AgentKind::ResumeBuilder => "Create professional resumes with AI guidance",
            AgentKind::HashtagGenerator => "Generate trending hashtags for your content",
            AgentKind::PlagiarismChecker => "Scan text for plagiarism with detailed reports",
            AgentKind::GrammarChecker => "Check and correct grammar, spelling, and punctuation",
            AgentKind::TestimonialTransformer => {
                "Transform testimonials into multiple content formats"
            }
            AgentKind::DocumentFormatter => "Professional document formatting and styling",
            AgentKind::ImageGenerator => "Creates custom AI images",
            AgentKind::ContentWriter => "Writes engaging content fast",
            AgentKind::DataAnalyzer => "Processes data for insights",
            AgentKind::SeoOptimizer => "Improves search rankings quickly",
            AgentKind::CustomerServiceBot => "24/7 customer support assistant",
            AgentKind::MarketAnalyst => "Analyzes market trends expertly",
            AgentKind::TranslationExpert => "Translates multiple languages instantly",
            AgentKind::ResearchAssistant => "Fast comprehensive research helper",
            AgentKind::AcademicAssistant => "Personalized learning support",
            AgentKind::CodeAssistant => "Clean, explained solutions to programming questions",
            AgentKind::LeadGenerator => "Finds and qualifies potential business leads",
            AgentKind::JobSearch => "Searches job boards and ranks postings against your resume",
        }
    }

    /// Persona sentence every prompt for this agent starts with.
    pub fn persona(self) -> &'static str {
        prompts::persona(self)
    }

    /// Instruction used when the requested service is unknown to this agent.
    pub fn general_instruction(self) -> &'static str {
        prompts::general_instruction(self)
    }

    /// Service kinds this agent understands, in display order.
    pub fn services(self) -> &'static [ServiceKind] {
        use ServiceKind::*;
        match self {
            AgentKind::CareerCoach => &[
                CareerAdvice,
                ResumeTips,
                InterviewPrep,
                SkillGap,
                JobSearchStrategy,
            ],
            AgentKind::CompanyResearch => &[
                CompanyProfile,
                FinancialAnalysis,
                MarketPosition,
                CompetitorAnalysis,
                IndustryTrends,
            ],
            AgentKind::PersonalStylist => &[
                FashionAdvice,
                OutfitRecommendations,
                WardrobeAnalysis,
                TrendAnalysis,
                ShoppingAssistance,
            ],
            AgentKind::ResumeBuilder => &[ResumeWriting],
            AgentKind::HashtagGenerator => &[HashtagGeneration],
            AgentKind::PlagiarismChecker => &[PlagiarismScan],
            AgentKind::GrammarChecker => &[GrammarCheck],
            AgentKind::TestimonialTransformer => &[TestimonialRewrite],
            AgentKind::DocumentFormatter => &[DocumentFormatting],
            AgentKind::ImageGenerator => &[ImageDescription],
            AgentKind::ContentWriter => &[ContentWriting],
            AgentKind::DataAnalyzer => &[DataAnalysis],
            AgentKind::SeoOptimizer => &[SeoOptimization],
            AgentKind::CustomerServiceBot => &[CustomerSupport],
            AgentKind::MarketAnalyst => &[MarketAnalysis],
            AgentKind::TranslationExpert => &[Translation],
            AgentKind::ResearchAssistant => &[ResearchAnalysis],
            AgentKind::AcademicAssistant => &[AcademicTutoring],
            AgentKind::CodeAssistant => &[CodeSolution],
            AgentKind::LeadGenerator => &[LeadGeneration],
            AgentKind::JobSearch => &[JobSearchStrategy],
        }
    }

    /// The service used when a request names none.
    pub fn default_service(self) -> ServiceKind {
        self.services()
            .first()
            .copied()
            .unwrap_or(ServiceKind::General)
    }

    /// Whether `service` has a dedicated template for this agent.
    pub fn supports(self, service: ServiceKind) -> bool {
        self.services().contains(&service)
    }

    pub fn card(self) -> AgentCard {
        AgentCard {
            slug: self.slug(),
            name: self.name(),
            description: self.description(),
            path: format!("/{}", self.slug()),
            services: self.services().iter().map(|s| s.key()).collect(),
        }
    }
}

/// The full marketplace listing, in catalog order.
pub fn catalog() -> Vec<AgentCard> {
    AgentKind::ALL.into_iter().map(AgentKind::card).collect()
}
