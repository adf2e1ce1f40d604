//! Simulation Application Service (Use Case)
//!
//! One request runs: validate -> buyer reply -> feedback. The two
//! completion calls are strictly sequential; feedback needs the reply.
//! Provider failures are logged here and never retried.

use std::sync::Arc;
use thiserror::Error;

use voicelogic::{
    BuyerReply, CompletionOptions, CompletionProvider, DomainError, Identity, PersonaChoice,
    Pitch, PromptTemplates, SimulationRequest, SimulationResult,
};

/// Runtime knobs for the simulation
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// Temperature for the buyer reply (`None` = provider default)
    pub buyer_temperature: Option<f32>,
    /// Temperature for the coaching feedback (`None` = provider default)
    pub feedback_temperature: Option<f32>,
    /// Honor per-request persona prompts and catalog ids
    pub allow_persona_override: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            buyer_temperature: Some(0.9),
            feedback_temperature: None,
            allow_persona_override: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Pitch text cannot be empty")]
    EmptyInput,

    #[error("{0}")]
    UnknownPersona(String),

    #[error("Completion provider failure: {0}")]
    ProviderFailure(#[source] DomainError),
}

/// Application service for buyer simulations
pub struct SimulationService {
    provider: Option<Arc<dyn CompletionProvider>>,
    templates: PromptTemplates,
    settings: SimulationSettings,
}

impl SimulationService {
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        templates: PromptTemplates,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            provider,
            templates,
            settings,
        }
    }

    /// Run one full simulation round
    pub async fn simulate(
        &self,
        request: SimulationRequest,
        identity: Option<&Identity>,
    ) -> Result<SimulationResult, SimulationError> {
        let pitch = Pitch::parse(&request.user_text).map_err(|_| {
            tracing::debug!(state = "rejected_empty_input", "Empty pitch rejected");
            SimulationError::EmptyInput
        })?;

        let persona = self.resolve_persona(&request)?;

        tracing::debug!(
            state = "validated",
            persona = persona.label(),
            caller = identity.map(Identity::subject).unwrap_or("anonymous"),
            pitch_chars = pitch.as_str().chars().count(),
            "Simulation request validated"
        );

        let reply = self.generate_buyer_reply(&pitch, &persona).await?;
        tracing::debug!(state = "buyer_reply_generated", "Buyer reply generated");

        let feedback = self.generate_feedback(&pitch, &reply).await?;
        tracing::debug!(state = "feedback_generated", "Feedback generated");

        tracing::info!(
            persona = persona.label(),
            caller = identity.map(Identity::subject).unwrap_or("anonymous"),
            templates = %self.templates.version,
            "✅ Simulation completed"
        );

        Ok(SimulationResult::new(reply, feedback))
    }

    /// First call: the simulated buyer's reply to the pitch
    pub async fn generate_buyer_reply(
        &self,
        pitch: &Pitch,
        persona: &PersonaChoice,
    ) -> Result<BuyerReply, SimulationError> {
        let system = self.buyer_system_prompt(persona);
        let user = self.templates.render_buyer_user(pitch);
        let options = CompletionOptions::with_temperature(self.settings.buyer_temperature);

        let text = self.complete("buyer_reply", system, &user, &options).await?;
        Ok(BuyerReply::new(text))
    }

    /// Second call: coaching feedback on the pitch and the reply it got
    pub async fn generate_feedback(
        &self,
        pitch: &Pitch,
        reply: &BuyerReply,
    ) -> Result<String, SimulationError> {
        let user = self.templates.render_coach_user(pitch, reply);
        let options = CompletionOptions::with_temperature(self.settings.feedback_temperature);

        self.complete("feedback", &self.templates.coach_system, &user, &options)
            .await
    }

    async fn complete(
        &self,
        step: &'static str,
        system: &str,
        user: &str,
        options: &CompletionOptions,
    ) -> Result<String, SimulationError> {
        let provider = self.provider()?;
        let response = provider
            .complete_with_system(system, user, options)
            .await
            .map_err(|e| provider_failure(step, provider, e))?;

        tracing::debug!(
            step,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            "Completion received"
        );

        Ok(response.content)
    }

    /// Persona fields are only looked at when overrides are allowed
    fn resolve_persona(
        &self,
        request: &SimulationRequest,
    ) -> Result<PersonaChoice, SimulationError> {
        if !self.settings.allow_persona_override {
            if request.persona_prompt.is_some() || request.persona_id.is_some() {
                tracing::debug!("Persona override disabled, using default buyer");
            }
            return Ok(PersonaChoice::Default);
        }

        request.persona_choice().map_err(|e| match e {
            DomainError::Validation(message) => SimulationError::UnknownPersona(message),
            other => SimulationError::UnknownPersona(other.to_string()),
        })
    }

    fn provider(&self) -> Result<&dyn CompletionProvider, SimulationError> {
        match &self.provider {
            Some(provider) => Ok(provider.as_ref()),
            None => {
                tracing::error!(
                    state = "provider_failure",
                    "❌ No completion provider configured (OPENAI_API_KEY missing)"
                );
                Err(SimulationError::ProviderFailure(DomainError::Configuration(
                    "Completion provider credential is not configured".to_string(),
                )))
            }
        }
    }

    fn buyer_system_prompt<'a>(&'a self, persona: &'a PersonaChoice) -> &'a str {
        match persona {
            PersonaChoice::Default => self.templates.buyer_system.as_str(),
            PersonaChoice::Catalog(p) => p.prompt,
            PersonaChoice::Custom(prompt) => prompt.as_str(),
        }
    }
}

fn provider_failure(
    step: &'static str,
    provider: &dyn CompletionProvider,
    error: DomainError,
) -> SimulationError {
    tracing::error!(
        state = "provider_failure",
        step,
        provider = provider.provider_name(),
        model = provider.model_id(),
        error = %error,
        "❌ Completion provider call failed"
    );
    SimulationError::ProviderFailure(error)
}
