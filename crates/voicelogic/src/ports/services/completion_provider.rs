//! Completion Provider Port
//!
//! Abstract interface for LLM (Large Language Model) chat completions.
//! The simulator only needs "system instruction + user turn in, text out",
//! so any chat-style provider (OpenAI, Anthropic, a test fake) fits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Options for LLM completion
///
/// `None` leaves the choice to the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    pub fn with_temperature(temperature: Option<f32>) -> Self {
        Self { temperature }
    }
}

/// Response from LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// Completion provider interface
///
/// Each provider has its own implementation in the server's adapters.
/// Any error returned here is a provider failure from the caller's
/// point of view (transport, HTTP status, rate limit, timeout, bad payload).
///
/// # Example
///
/// ```rust,ignore
/// use voicelogic::ports::CompletionProvider;
///
/// struct OpenAiProvider { /* ... */ }
///
/// #[async_trait]
/// impl CompletionProvider for OpenAiProvider {
///     async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions)
///         -> Result<CompletionResponse, DomainError> {
///         // Call the Chat Completions API
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError>;

    /// System instruction plus a single user turn
    async fn complete_with_system(
        &self,
        system: &str,
        user: &str,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.complete(&messages, options).await
    }

    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
