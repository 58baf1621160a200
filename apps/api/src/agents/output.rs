//! Shapes of generation output returned to callers.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::strip_json_fences;

/// Line that separates a summary from its detailed body.
pub const SECTION_SEPARATOR: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Model output, verbatim.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GenerationResult {
    pub fn from_text(text: String) -> Self {
        let (summary, details) = match split_sections(&text) {
            Some((s, d)) => (Some(s.to_string()), Some(d.to_string())),
            None => (None, None),
        };
        Self {
            text,
            summary,
            details,
        }
    }
}

/// Splits on the first line consisting solely of `---`.
/// Returns `None` when there is no separator or either half is blank.
pub fn split_sections(text: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim() == SECTION_SEPARATOR {
            let summary = text[..offset].trim();
            let details = text[offset + line.len()..].trim();
            if summary.is_empty() || details.is_empty() {
                return None;
            }
            return Some((summary, details));
        }
        offset += line.len();
    }
    None
}

/// Parses structured model output. Any mismatch is a distinct error,
/// never silently replaced with defaults.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    serde_json::from_str(strip_json_fences(text))
        .map_err(|e| AppError::MalformedOutput(format!("expected JSON object: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_separator_line() {
        let text = "Found 3 roles.\n---\n1. Senior Engineer\n2. Staff Engineer";
        let (summary, details) = split_sections(text).unwrap();
        assert_eq!(summary, "Found 3 roles.");
        assert!(details.starts_with("1. Senior Engineer"));
    }

    #[test]
    fn test_inline_dashes_do_not_split() {
        assert!(split_sections("pros --- cons").is_none());
        assert!(split_sections("no separator here").is_none());
    }

    #[test]
    fn test_blank_half_is_not_a_split() {
        assert!(split_sections("---\nonly details").is_none());
    }

    #[test]
    fn test_result_keeps_text_verbatim() {
        let text = "  Summary\n---\nDetails  ".to_string();
        let result = GenerationResult::from_text(text.clone());
        assert_eq!(result.text, text);
        assert_eq!(result.summary.as_deref(), Some("Summary"));
        assert_eq!(result.details.as_deref(), Some("Details"));
    }

    #[test]
    fn test_parse_structured_rejects_prose() {
        #[derive(Debug, Deserialize)]
        struct Tags {
            #[allow(dead_code)]
            hashtags: Vec<String>,
        }
        let result = parse_structured::<Tags>("Here you go: #rust #axum");
        assert!(matches!(result, Err(AppError::MalformedOutput(_))));
    }

    #[test]
    fn test_parse_structured_rejects_missing_fields() {
        #[derive(Debug, Deserialize)]
        struct Tags {
            #[allow(dead_code)]
            hashtags: Vec<String>,
        }
        let result = parse_structured::<Tags>(r##"{"tags": ["#rust"]}"##);
        assert!(matches!(result, Err(AppError::MalformedOutput(_))));
    }
}
