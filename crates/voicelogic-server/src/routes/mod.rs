//! VoiceLogic API Routes
//!
//! - /simulate - Buyer reply + coaching feedback (bearer auth when enabled)
//! - /personas - Built-in buyer persona catalog
//! - /swagger-ui, /api-docs/openapi.json - OpenAPI documentation

pub mod personas;
pub mod simulate;
pub mod swagger;
