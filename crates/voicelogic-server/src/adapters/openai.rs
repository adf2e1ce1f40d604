//! OpenAI Chat Completions implementation of CompletionProvider

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use voicelogic::{
    ChatMessage, CompletionOptions, CompletionProvider, CompletionResponse, DomainError,
    TokenUsage,
};

use crate::config::LlmConfig;

/// Completion provider backed by the OpenAI REST API
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Build from config; `Ok(None)` when no API key is configured
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, DomainError> {
        config
            .api_key
            .as_ref()
            .map(|key| Self::new(key, &config.model, &config.base_url, config.timeout))
            .transpose()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    DomainError::Timeout(self.timeout)
                } else {
                    DomainError::ExternalService(format!("OpenAI request failed: {err}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body, retry_after));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| DomainError::ExternalService(format!("Invalid OpenAI response: {err}")))?;

        into_completion(payload)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ============================================
// Helper Functions
// ============================================

fn into_completion(payload: ChatCompletionResponse) -> Result<CompletionResponse, DomainError> {
    let choice = payload
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::ExternalService("OpenAI returned no choices".to_string()))?;

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| DomainError::ExternalService("OpenAI returned empty content".to_string()))?;

    let usage = payload
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        model: payload.model,
        usage,
        finish_reason: choice.finish_reason,
    })
}

fn map_http_error(status: StatusCode, body: &str, retry_after: Option<Duration>) -> DomainError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::RateLimited { retry_after };
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    DomainError::ExternalService(format!("OpenAI API error ({}): {}", status.as_u16(), message))
}
