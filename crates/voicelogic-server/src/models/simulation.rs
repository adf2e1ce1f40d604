//! Simulation - Request/Response DTOs for `/simulate`

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use voicelogic::{SimulationRequest, SimulationResult};

pub const EMPTY_INPUT_FEEDBACK: &str = "Please share your pitch before simulating the buyer.";
pub const FALLBACK_BUYER_REPLY: &str = "Our buyer is thinking—please retry in a moment.";
pub const FALLBACK_FEEDBACK: &str =
    "We hit a temporary issue reaching the AI service. Try again shortly.";

pub const MISSING_AUTH_DETAIL: &str = "Missing or invalid authorization header";
pub const INVALID_TOKEN_DETAIL: &str = "Invalid or expired token";
pub const INVALID_BODY_DETAIL: &str = "Request body must be a JSON object with a string user_text";

/// Simulate request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SimulateRequest {
    /// The salesperson's pitch
    #[schema(example = "This house has a great view and a new roof.")]
    pub user_text: String,
    /// Replaces the default buyer persona instruction in full
    #[serde(default)]
    pub persona_prompt: Option<String>,
    /// Built-in persona id (see `/personas`); ignored when `persona_prompt` is set
    #[serde(default)]
    pub persona_id: Option<String>,
}

impl From<SimulateRequest> for SimulationRequest {
    fn from(request: SimulateRequest) -> Self {
        SimulationRequest {
            user_text: request.user_text,
            persona_prompt: request.persona_prompt,
            persona_id: request.persona_id,
        }
    }
}

/// Simulate response (also used for 400 and 500 bodies)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SimulateResponse {
    pub buyer_reply: String,
    pub feedback: String,
}

impl SimulateResponse {
    pub fn empty_input() -> Self {
        Self {
            buyer_reply: String::new(),
            feedback: EMPTY_INPUT_FEEDBACK.to_string(),
        }
    }

    pub fn unknown_persona(message: impl Into<String>) -> Self {
        Self {
            buyer_reply: String::new(),
            feedback: message.into(),
        }
    }

    pub fn provider_failure() -> Self {
        Self {
            buyer_reply: FALLBACK_BUYER_REPLY.to_string(),
            feedback: FALLBACK_FEEDBACK.to_string(),
        }
    }
}

impl From<SimulationResult> for SimulateResponse {
    fn from(result: SimulationResult) -> Self {
        Self {
            buyer_reply: result.buyer_reply,
            feedback: result.feedback,
        }
    }
}

/// Error body for authentication failures and malformed requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
