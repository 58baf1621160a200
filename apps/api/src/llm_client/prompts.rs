// Shared prompt fragments.
// Each area that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to instructions whose output is rendered as Markdown sections.
pub const MARKDOWN_SECTIONS: &str =
    "Format the response in clear sections with headings using Markdown.";

/// Appended to instructions whose output is rendered as plain text.
pub const PLAIN_TEXT_SECTIONS: &str = "Format your response as plain text with clear headings \
    and bullet points where appropriate. Do not use markdown or any other formatting.";
