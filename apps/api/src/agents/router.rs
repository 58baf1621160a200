//! Prompt composition: (agent, service, raw input, context) -> messages.
//!
//! Everything here is pure. Template selection is total: a service the
//! agent does not own, or `ServiceKind::General`, selects the agent's
//! generic instruction instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::agents::catalog::AgentKind;
use crate::agents::prompts::{format_rule, service_instruction, PLACEHOLDER_DEFAULTS};
use crate::agents::service::ServiceKind;
use crate::llm_client::ChatMessage;

/// Optional interpolation values sent alongside the raw input
/// (`resume_excerpt`, `linkedin_url`, `tone`, `language`, ...).
/// Keys are kept sorted so the composed prompt is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuxiliaryContext(BTreeMap<String, String>);

impl AuxiliaryContext {
    /// Inserts only when the key is absent or blank. Caller-supplied values win.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let blank = self.get(&key).is_none();
        if blank {
            self.0.insert(key, value.into());
        }
    }

    /// Returns the trimmed value, treating blank strings as missing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }
}

/// The two halves of a composed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    /// Persona plus the selected instruction, placeholders filled.
    pub instruction: String,
    /// Optional context block followed by the raw input, verbatim.
    pub user: String,
}

impl ComposedPrompt {
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.instruction.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

/// Resolves the service actually used for `agent`.
pub fn select_service(agent: AgentKind, requested: Option<ServiceKind>) -> ServiceKind {
    match requested {
        None => agent.default_service(),
        Some(service) if agent.supports(service) => service,
        Some(_) => ServiceKind::General,
    }
}

pub fn compose(
    agent: AgentKind,
    service: ServiceKind,
    raw_input: &str,
    context: &AuxiliaryContext,
) -> ComposedPrompt {
    let body = match service_instruction(service) {
        Some(text) if agent.supports(service) => text,
        _ => agent.general_instruction(),
    };

    let mut instruction = format!("{} {}", agent.persona(), body);
    if let Some(rule) = format_rule(service).filter(|_| agent.supports(service)) {
        instruction.push(' ');
        instruction.push_str(rule);
    }
    let (instruction, consumed) = fill_placeholders(&instruction, context);

    let block = context_block(context, &consumed);
    let user = if block.is_empty() {
        raw_input.to_string()
    } else {
        format!("{block}\n\n{raw_input}")
    };

    ComposedPrompt { instruction, user }
}

/// Replaces `{key}` with the context value or its default.
/// Returns the filled text and the context keys that were used.
pub fn fill_placeholders(template: &str, context: &AuxiliaryContext) -> (String, Vec<String>) {
    let mut out = template.to_string();
    let mut consumed = Vec::new();

    for &(key, default) in PLACEHOLDER_DEFAULTS {
        let needle = format!("{{{key}}}");
        if !out.contains(&needle) {
            continue;
        }
        let value = match context.get(key) {
            Some(v) => {
                consumed.push(key.to_string());
                v
            }
            None => default,
        };
        out = out.replace(&needle, value);
    }

    (out, consumed)
}

fn context_block(context: &AuxiliaryContext, skip: &[String]) -> String {
    let lines: Vec<String> = context
        .entries()
        .filter(|(k, _)| !skip.iter().any(|s| s.as_str() == *k))
        .map(|(k, v)| format!("- {}: {}", k.replace('_', " "), v))
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        format!("Context:\n{}", lines.join("\n"))
    }
}

#[cfg(test)]
impl AuxiliaryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl ComposedPrompt {
    /// Flattened single-string form: instruction, blank line, user message.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.instruction, self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::prompts;

    #[test]
    fn test_every_known_service_composes_with_raw_input() {
        let raw = "Tell me something useful.";
        for agent in AgentKind::ALL {
            for &service in agent.services() {
                let prompt = compose(agent, service, raw, &AuxiliaryContext::new());
                assert!(!prompt.instruction.trim().is_empty());
                assert!(prompt.render().contains(raw), "{service} lost the raw input");
            }
        }
    }

    #[test]
    fn test_unknown_service_uses_generic_instruction() {
        let service = ServiceKind::from_key("quantum-astrology");
        let prompt = compose(
            AgentKind::CareerCoach,
            service,
            "help",
            &AuxiliaryContext::new(),
        );
        assert!(prompt
            .instruction
            .ends_with(AgentKind::CareerCoach.general_instruction()));
    }

    #[test]
    fn test_foreign_service_falls_back_to_generic_instruction() {
        let prompt = compose(
            AgentKind::PersonalStylist,
            ServiceKind::InterviewPrep,
            "help",
            &AuxiliaryContext::new(),
        );
        assert!(prompt.instruction.starts_with(AgentKind::PersonalStylist.persona()));
        assert!(!prompt.instruction.contains("interview preparation"));
    }

    #[test]
    fn test_interview_prep_prompt_starts_with_instruction_and_ends_with_input() {
        let raw = "I have a PM interview at a fintech startup tomorrow";
        let prompt = compose(
            AgentKind::CareerCoach,
            ServiceKind::from_key("interview-prep"),
            raw,
            &AuxiliaryContext::new(),
        );
        let expected_prefix = format!(
            "{} {}",
            AgentKind::CareerCoach.persona(),
            prompts::service_instruction(ServiceKind::InterviewPrep).unwrap()
        );
        let rendered = prompt.render();
        assert!(rendered.starts_with(&expected_prefix));
        assert!(rendered.ends_with(raw));
    }

    #[test]
    fn test_translation_fills_language_from_context() {
        let context = AuxiliaryContext::new().with("language", "Spanish");
        let prompt = compose(
            AgentKind::TranslationExpert,
            ServiceKind::Translation,
            "Good morning",
            &context,
        );
        assert!(prompt.instruction.contains("to Spanish"));
        assert!(!prompt.instruction.contains("{language}"));
        // consumed placeholders stay out of the context block
        assert_eq!(prompt.user, "Good morning");
    }

    #[test]
    fn test_translation_defaults_to_english() {
        let prompt = compose(
            AgentKind::TranslationExpert,
            ServiceKind::Translation,
            "Bonjour",
            &AuxiliaryContext::new(),
        );
        assert!(prompt.instruction.contains("to English"));
    }

    #[test]
    fn test_context_block_precedes_raw_input() {
        let context = AuxiliaryContext::new()
            .with("resume_excerpt", "5 years of backend work")
            .with("tone", "   ");
        let prompt = compose(
            AgentKind::CareerCoach,
            ServiceKind::SkillGap,
            "What should I learn next?",
            &context,
        );
        assert_eq!(
            prompt.user,
            "Context:\n- resume excerpt: 5 years of backend work\n\nWhat should I learn next?"
        );
    }

    #[test]
    fn test_research_services_request_markdown_sections() {
        let prompt = compose(
            AgentKind::CompanyResearch,
            ServiceKind::CompanyProfile,
            "Acme Corp",
            &AuxiliaryContext::new(),
        );
        assert!(prompt.instruction.ends_with(crate::llm_client::prompts::MARKDOWN_SECTIONS));
    }

    #[test]
    fn test_select_service_defaults_and_fallbacks() {
        assert_eq!(
            select_service(AgentKind::CareerCoach, None),
            ServiceKind::CareerAdvice
        );
        assert_eq!(
            select_service(AgentKind::CareerCoach, Some(ServiceKind::FashionAdvice)),
            ServiceKind::General
        );
        assert_eq!(
            select_service(AgentKind::JobSearch, Some(ServiceKind::JobSearchStrategy)),
            ServiceKind::JobSearchStrategy
        );
    }

    #[test]
    fn test_messages_split_instruction_and_user() {
        let prompt = compose(
            AgentKind::CodeAssistant,
            ServiceKind::CodeSolution,
            "Reverse a linked list",
            &AuxiliaryContext::new(),
        );
        let messages = prompt.to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system(prompt.instruction.clone()));
        assert_eq!(messages[1].content, "Reverse a linked list");
    }
}
