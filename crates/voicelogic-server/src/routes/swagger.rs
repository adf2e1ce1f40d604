//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{ErrorDetail, PersonaResponse, SimulateRequest, SimulateResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::simulate::simulate,
        super::personas::list_personas,
    ),
    info(
        title = "VoiceLogic API",
        version = "0.1.0",
        description = "AI buyer simulator\n\nPitch, hear the buyer, get coached.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Simulation", description = "Simulated buyer reply and coaching feedback"),
        (name = "Personas", description = "Built-in buyer personas"),
    ),
    components(
        schemas(
            SimulateRequest,
            SimulateResponse,
            ErrorDetail,
            PersonaResponse,
        )
    ),
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
