//! Test doubles for the completion provider and identity verifier

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use voicelogic::{
    ChatMessage, CompletionOptions, CompletionProvider, CompletionResponse, DomainError,
    Identity, IdentityVerifier, TokenUsage,
};

/// One recorded provider invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

impl RecordedCall {
    pub fn system(&self) -> &str {
        &self.messages[0].content
    }

    pub fn user(&self) -> &str {
        &self.messages[1].content
    }
}

/// Provider that replays scripted replies in order and records every call
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn replying(replies: &[&str]) -> Arc<Self> {
        let provider = Self::default();
        for reply in replies {
            provider.push_ok(reply);
        }
        Arc::new(provider)
    }

    pub fn push_ok(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn push_err(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply left".to_string()));

        match next {
            Ok(content) => Ok(CompletionResponse {
                content,
                model: "scripted-1".to_string(),
                usage: TokenUsage::default(),
                finish_reason: Some("stop".to_string()),
            }),
            Err(message) => Err(DomainError::ExternalService(message)),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-1"
    }
}

/// Verifier accepting exactly one token
pub struct FakeVerifier {
    pub valid_token: String,
    pub identity: Identity,
}

impl FakeVerifier {
    pub fn accepting(token: &str) -> Arc<Self> {
        Arc::new(Self {
            valid_token: token.to_string(),
            identity: Identity::new("uid-42", Some("seller@example.com".to_string())),
        })
    }
}

#[async_trait]
impl IdentityVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        if token == self.valid_token {
            Ok(self.identity.clone())
        } else {
            Err(DomainError::Unauthenticated("token expired".to_string()))
        }
    }

    fn verifier_name(&self) -> &str {
        "fake"
    }
}
