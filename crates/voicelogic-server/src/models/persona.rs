//! Persona - Buyer persona catalog DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use voicelogic::{Difficulty, Persona};

/// Persona catalog entry
#[derive(Debug, Serialize, ToSchema)]
pub struct PersonaResponse {
    pub id: String,
    pub name: String,
    /// easy, medium, hard or expert
    pub difficulty: String,
    pub difficulty_label: String,
    pub description: String,
    /// System instruction used when this persona is selected
    pub prompt: String,
}

impl From<&Persona> for PersonaResponse {
    fn from(persona: &Persona) -> Self {
        Self {
            id: persona.id.to_string(),
            name: persona.name.to_string(),
            difficulty: persona.difficulty.to_string(),
            difficulty_label: persona.difficulty.label().to_string(),
            description: persona.description.to_string(),
            prompt: persona.prompt.to_string(),
        }
    }
}

/// Optional catalog filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PersonaQuery {
    /// Only personas of this difficulty
    pub difficulty: Option<String>,
}

impl PersonaQuery {
    pub fn difficulty(&self) -> Result<Option<Difficulty>, String> {
        self.difficulty
            .as_deref()
            .filter(|d| !d.trim().is_empty() && d.trim() != "all")
            .map(str::parse::<Difficulty>)
            .transpose()
    }
}
