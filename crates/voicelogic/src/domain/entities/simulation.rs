//! Simulation - One pitch, one buyer reply, one round of coaching
//!
//! `BuyerReply` is the hand-off between the two completion calls: feedback
//! generation takes it as an argument, so it cannot run before the reply
//! exists.

use serde::{Deserialize, Serialize};

use super::Persona;
use crate::domain::errors::DomainError;

/// Incoming simulation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationRequest {
    pub user_text: String,
    #[serde(default)]
    pub persona_prompt: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
}

impl SimulationRequest {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            ..Default::default()
        }
    }

    pub fn with_persona_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.persona_prompt = Some(prompt.into());
        self
    }

    pub fn with_persona_id(mut self, id: impl Into<String>) -> Self {
        self.persona_id = Some(id.into());
        self
    }

    /// Resolve the persona to use. A custom prompt wins over a catalog id.
    pub fn persona_choice(&self) -> Result<PersonaChoice, DomainError> {
        if let Some(prompt) = non_blank(self.persona_prompt.as_deref()) {
            return Ok(PersonaChoice::Custom(prompt.to_string()));
        }

        match non_blank(self.persona_id.as_deref()) {
            Some(id) => Persona::find(id)
                .map(PersonaChoice::Catalog)
                .ok_or_else(|| DomainError::validation(format!("Unknown buyer persona: {}", id))),
            None => Ok(PersonaChoice::Default),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Which system instruction drives the simulated buyer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaChoice {
    Default,
    Catalog(&'static Persona),
    Custom(String),
}

impl PersonaChoice {
    /// Short label for logs
    pub fn label(&self) -> &str {
        match self {
            PersonaChoice::Default => "default",
            PersonaChoice::Catalog(persona) => persona.id,
            PersonaChoice::Custom(_) => "custom",
        }
    }
}

/// The salesperson's pitch exactly as typed, known to hold non-whitespace text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pitch(String);

impl Pitch {
    pub fn parse(user_text: &str) -> Result<Self, DomainError> {
        if user_text.trim().is_empty() {
            return Err(DomainError::validation("Pitch text cannot be empty"));
        }
        Ok(Self(user_text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Verbatim text of the simulated buyer's reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerReply(String);

impl BuyerReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Outcome of a completed simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub buyer_reply: String,
    pub feedback: String,
}

impl SimulationResult {
    pub fn new(buyer_reply: BuyerReply, feedback: String) -> Self {
        Self {
            buyer_reply: buyer_reply.into_inner(),
            feedback,
        }
    }
}
