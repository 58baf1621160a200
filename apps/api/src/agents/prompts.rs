// All prompt templates for the agent marketplace.
// A composed instruction is `persona(agent)` followed by either the
// service instruction or the agent's general instruction.
//
// Placeholders of the form `{key}` are filled from the request context;
// see `router::fill_placeholders`.

use crate::agents::catalog::AgentKind;
use crate::agents::service::ServiceKind;
use crate::llm_client::prompts::{MARKDOWN_SECTIONS, PLAIN_TEXT_SECTIONS};

/// Defaults for placeholders the request context did not supply.
pub const PLACEHOLDER_DEFAULTS: &[(&str, &str)] = &[("language", "English")];

pub fn persona(agent: AgentKind) -> &'static str {
    match agent {
        AgentKind::CompanyResearch => "You are an expert business analyst and company researcher.",
        AgentKind::PersonalStylist => "You are an expert personal stylist and fashion advisor.",
        AgentKind::CareerCoach => "You are an experienced career coach and professional advisor.",
        AgentKind::ResumeBuilder => "You are a professional resume writer.",
        AgentKind::HashtagGenerator => "You are a social media strategist.",
        AgentKind::PlagiarismChecker => "You are an academic integrity reviewer.",
        AgentKind::GrammarChecker => "You are a meticulous copy editor.",
        AgentKind::TestimonialTransformer => "You are a marketing copywriter.",
        AgentKind::DocumentFormatter => "You are a professional document designer.",
        AgentKind::ImageGenerator => {
            "You are an AI that can describe images in great detail based on text prompts."
        }
        AgentKind::ContentWriter => {
            "You are a helpful AI assistant that provides high-quality content generation."
        }
        AgentKind::DataAnalyzer => {
            "You are a data analyst who can analyze and interpret data to provide meaningful insights."
        }
        AgentKind::SeoOptimizer => "You are a search engine optimization specialist.",
        AgentKind::CustomerServiceBot => {
            "You are a helpful and friendly customer service representative."
        }
        AgentKind::MarketAnalyst => "You are a senior market analyst.",
        AgentKind::TranslationExpert => "You are a professional translator.",
        AgentKind::ResearchAssistant => {
            "You are a research assistant that provides comprehensive analysis on various topics."
        }
        AgentKind::AcademicAssistant => "You are a patient academic tutor.",
        AgentKind::CodeAssistant => "You are a coding assistant who helps with programming \
            questions and provides clean, efficient code solutions with explanations.",
        AgentKind::LeadGenerator => {
            "You are a lead generation specialist who helps businesses identify potential customers."
        }
        AgentKind::JobSearch => "You are an experienced recruiter and job search advisor.",
    }
}

pub fn general_instruction(agent: AgentKind) -> &'static str {
    match agent {
        AgentKind::CompanyResearch => "Provide a comprehensive analysis of the company's \
            business operations and market position.",
        AgentKind::PersonalStylist => {
            "Provide general fashion and style guidance tailored to the user's needs."
        }
        AgentKind::CareerCoach => {
            "Provide general career guidance and professional development advice."
        }
        AgentKind::JobSearch => "Provide job search strategies and suggestions based on the \
            user's preferences and background.",
        _ => "Respond helpfully and accurately to the user's request.",
    }
}

/// Dedicated instruction for a service. `General` has none.
pub fn service_instruction(service: ServiceKind) -> Option<&'static str> {
    let text = match service {
        // Career coach
        ServiceKind::CareerAdvice => "Provide personalized career advice based on the user's \
            background and goals. Focus on actionable steps and industry insights.",
        ServiceKind::ResumeTips => "Analyze resumes and provide specific, actionable feedback \
            for improvement. Focus on formatting, content, and keywords that will help the \
            resume stand out.",
        ServiceKind::InterviewPrep => "Provide interview preparation advice, including common \
            questions, suggested answers, and tips for success. Consider both technical and \
            behavioral aspects.",
        ServiceKind::SkillGap => "Analyze the user's current skills and career goals to \
            identify gaps. Suggest specific resources and learning paths for improvement.",
        ServiceKind::JobSearchStrategy => "Provide job search strategies and suggestions based \
            on the user's preferences and background. Include tips for networking and \
            application processes.",

        // Company research
        ServiceKind::CompanyProfile => "Create a detailed company profile including history, \
            mission, key executives, and main products/services.",
        ServiceKind::FinancialAnalysis => "Analyze the company's financial performance, \
            including revenue trends, profitability, and key financial metrics.",
        ServiceKind::MarketPosition => "Assess the company's market position, including \
            market share, competitive advantages, and growth opportunities.",
        ServiceKind::CompetitorAnalysis => "Identify and analyze key competitors, comparing \
            their strengths, weaknesses, and market strategies.",
        ServiceKind::IndustryTrends => "Analyze current industry trends, future outlook, and \
            how they impact the company.",

        // Personal stylist
        ServiceKind::FashionAdvice => "Provide personalized fashion advice based on the \
            user's preferences, style, and body type. Focus on creating a cohesive and \
            flattering wardrobe.",
        ServiceKind::OutfitRecommendations => "Create specific outfit combinations for \
            different occasions, considering color harmony, style compatibility, and current \
            trends.",
        ServiceKind::WardrobeAnalysis => "Analyze the user's wardrobe and provide suggestions \
            for essential pieces, versatile combinations, and items to consider removing.",
        ServiceKind::TrendAnalysis => "Share insights about current fashion trends, upcoming \
            seasonal styles, and how to incorporate them into a personal wardrobe.",
        ServiceKind::ShoppingAssistance => "Provide specific shopping recommendations within \
            the user's budget, including where to find items and what to look for in terms of \
            quality and fit.",

        // Single-purpose agents
        ServiceKind::ResumeWriting => "Turn the user's experience into concise, \
            achievement-focused resume sections: summary, experience bullets with measurable \
            impact, skills, and education.",
        ServiceKind::HashtagGeneration => "Suggest relevant, trending hashtags for the \
            user's content, grouped by category.",
        ServiceKind::PlagiarismScan => "Review the text for passages that appear copied or \
            closely paraphrased from common sources. Report an estimated originality \
            percentage, list suspicious passages with the reason they were flagged, and \
            suggest how to rewrite them.",
        ServiceKind::GrammarCheck => "Check the text for grammar, spelling, and punctuation \
            errors. Return the corrected text first, then a line containing only ---, then \
            a list of each correction with a short explanation.",
        ServiceKind::TestimonialRewrite => "Transform the customer testimonial into a short \
            social media post, a website quote, an email snippet, and a case-study \
            paragraph, keeping the customer's meaning intact.",
        ServiceKind::DocumentFormatting => "Restructure the document with consistent \
            headings, numbered sections, and clean paragraphs without changing its content.",
        ServiceKind::ImageDescription => "Generate a detailed description of an image based \
            on the prompt. Describe what would be in the image, including visual details, \
            composition, style, colors, and mood.",
        ServiceKind::ContentWriting => "Write engaging, well-structured content for the \
            request.",
        ServiceKind::DataAnalysis => "Analyze the data and provide: 1. Summary Statistics \
            2. Key Trends and Patterns 3. Notable Correlations 4. Recommendations based on \
            the analysis. Format the response in clear sections with detailed insights.",
        ServiceKind::SeoOptimization => "Optimize the content for search engines. Provide: \
            1. Keyword analysis and suggestions 2. Meta title and description recommendations \
            3. Content structure improvements 4. Readability improvements 5. Internal and \
            external linking suggestions 6. Any other SEO recommendations that would help \
            this content rank better.",
        ServiceKind::CustomerSupport => "Be polite, empathetic, provide clear information, \
            offer specific solutions when possible, and ask clarifying questions if needed.",
        ServiceKind::MarketAnalysis => "Provide a comprehensive market analysis including: \
            1. Market overview and current trends 2. Key players and their market shares \
            3. Growth opportunities and challenges 4. Competitive landscape 5. Future outlook \
            and predictions.",
        ServiceKind::Translation => "Translate the given text to {language} accurately, \
            maintaining the original meaning and tone. Provide only the translated text \
            without any additional comments or explanations.",
        ServiceKind::ResearchAnalysis => "Analyze the topic and provide: 1. Executive Summary \
            2. Background Information 3. Key Findings 4. Analysis and Discussion \
            5. Conclusions and Recommendations 6. References and Further Reading.",
        ServiceKind::AcademicTutoring => "Explain the concept step by step at the student's \
            level, check understanding with one short practice question, and point to \
            further study material.",
        ServiceKind::CodeSolution => "Provide: 1. Code solution 2. Explanation of the \
            solution 3. Any relevant best practices or considerations 4. Example usage if \
            applicable. Format the response with clear code blocks and explanations.",
        ServiceKind::LeadGeneration => "Provide a structured response with: 1. Target Market \
            Analysis 2. Ideal Customer Profile 3. List of Potential Leads (with company names, \
            contact roles) 4. Outreach Strategy 5. Follow-up Recommendations.",
        ServiceKind::General => return None,
    };
    Some(text)
}

/// Output formatting rule appended after the instruction, if any.
pub fn format_rule(service: ServiceKind) -> Option<&'static str> {
    match service {
        ServiceKind::CompanyProfile
        | ServiceKind::FinancialAnalysis
        | ServiceKind::MarketPosition
        | ServiceKind::CompetitorAnalysis
        | ServiceKind::IndustryTrends
        | ServiceKind::ResearchAnalysis
        | ServiceKind::LeadGeneration
        | ServiceKind::MarketAnalysis => Some(MARKDOWN_SECTIONS),
        ServiceKind::SeoOptimization => Some(PLAIN_TEXT_SECTIONS),
        _ => None,
    }
}

/// Persona for structured hashtag generation. Sent with `JSON_ONLY_SYSTEM`.
pub const HASHTAG_SYSTEM: &str = "You are a social media strategist.";

/// Hashtag prompt template.
/// Replace: {count}, {platform}, {language}, {length}, {text}
pub const HASHTAG_PROMPT_TEMPLATE: &str = r##"Generate {count} hashtags for the content below.

Target platform: {platform}
Language: {language}
Preferred hashtag length: {length}

Return a JSON object with this EXACT schema (no extra fields):
{
  "hashtags": ["#example"],
  "trending": ["#example"],
  "categories": {
    "category name": ["#example"]
  }
}

CONTENT:
{text}"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_service_has_an_instruction() {
        for kind in ServiceKind::KNOWN {
            let text = service_instruction(kind).unwrap();
            assert!(!text.trim().is_empty(), "{kind} has an empty instruction");
        }
    }

    #[test]
    fn test_general_has_no_dedicated_instruction() {
        assert!(service_instruction(ServiceKind::General).is_none());
    }

    #[test]
    fn test_every_agent_has_persona_and_fallback() {
        for agent in AgentKind::ALL {
            assert!(persona(agent).starts_with("You are"));
            assert!(!general_instruction(agent).is_empty());
        }
    }

    #[test]
    fn test_translation_template_has_language_placeholder() {
        let text = service_instruction(ServiceKind::Translation).unwrap();
        assert!(text.contains("{language}"));
    }
}
