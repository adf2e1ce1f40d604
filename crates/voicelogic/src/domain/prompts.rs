//! Prompt Templates
//!
//! The buyer persona and coaching instructions are behavior, so they live
//! here as versioned data instead of inline string literals. Templates can
//! be overridden from a TOML file; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use super::entities::{BuyerReply, Pitch};
use super::errors::DomainError;

pub const USER_TEXT: &str = "user_text";
pub const BUYER_REPLY: &str = "buyer_reply";

const DEFAULT_VERSION: &str = "v1";

const DEFAULT_BUYER_SYSTEM: &str = "You are a realistic human buyer talking to a salesperson. \
Be skeptical, brief and conversational, the way a real person talks. \
React naturally, raise the objections a real buyer would, and ask about what matters to you. \
Never use bullet points, numbered lists, headings, bold text or any other structured formatting. \
Answer in two or three short sentences.";

const DEFAULT_BUYER_USER: &str = "The salesperson says:\n\n{user_text}\n\nReply as the buyer.";

const DEFAULT_COACH_SYSTEM: &str =
    "You are an experienced sales coach who gives direct, practical feedback.";

const DEFAULT_COACH_USER: &str = "A salesperson said:\n\n{user_text}\n\n\
The buyer replied:\n\n{buyer_reply}\n\n\
Give 2-3 concise, actionable suggestions the salesperson can use in their next response. \
Keep each suggestion to a single sentence.";

/// Prompt templates for both completion calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    pub version: String,
    /// Default buyer persona (system turn of the first call)
    pub buyer_system: String,
    /// User turn of the first call; must contain `{user_text}`
    pub buyer_user: String,
    /// System turn of the second call
    pub coach_system: String,
    /// User turn of the second call; must contain `{user_text}` and `{buyer_reply}`
    pub coach_user: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            buyer_system: DEFAULT_BUYER_SYSTEM.to_string(),
            buyer_user: DEFAULT_BUYER_USER.to_string(),
            coach_system: DEFAULT_COACH_SYSTEM.to_string(),
            coach_user: DEFAULT_COACH_USER.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Parse templates from TOML and validate them
    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        let templates: PromptTemplates = toml::from_str(content)
            .map_err(|e| DomainError::Configuration(format!("Invalid prompt templates: {}", e)))?;
        templates.validate()?;
        Ok(templates)
    }

    /// Check that every required placeholder is present
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("buyer_user", &self.buyer_user, &[USER_TEXT][..]),
            ("coach_user", &self.coach_user, &[USER_TEXT, BUYER_REPLY][..]),
        ];

        for (field, template, placeholders) in required {
            for name in placeholders {
                if !template.contains(&placeholder(name)) {
                    return Err(DomainError::validation(format!(
                        "Template '{}' is missing the {{{}}} placeholder",
                        field, name
                    )));
                }
            }
        }

        for (field, text) in [
            ("buyer_system", &self.buyer_system),
            ("coach_system", &self.coach_system),
        ] {
            if text.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "Template '{}' cannot be empty",
                    field
                )));
            }
        }

        Ok(())
    }

    /// User turn for the buyer reply call
    pub fn render_buyer_user(&self, pitch: &Pitch) -> String {
        render(&self.buyer_user, &[(USER_TEXT, pitch.as_str())])
    }

    /// User turn for the feedback call
    pub fn render_coach_user(&self, pitch: &Pitch, reply: &BuyerReply) -> String {
        render(
            &self.coach_user,
            &[(USER_TEXT, pitch.as_str()), (BUYER_REPLY, reply.as_str())],
        )
    }
}

fn placeholder(name: &str) -> String {
    format!("{{{}}}", name)
}

/// Single-pass substitution; inserted values are never re-scanned.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'outer: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        for (name, value) in values {
            let token = placeholder(name);
            if tail.starts_with(&token) {
                out.push_str(value);
                rest = &tail[token.len()..];
                continue 'outer;
            }
        }
        out.push('{');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}
