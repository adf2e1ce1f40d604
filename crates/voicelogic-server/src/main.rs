use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use voicelogic::{CompletionProvider, IdentityVerifier};

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

#[cfg(test)]
mod test_support;

use adapters::{FirebaseTokenVerifier, OpenAiProvider, StaticTokenVerifier};
use application::{SimulationService, SimulationSettings};
use config::{AppConfig, AuthConfig};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub simulation: Arc<SimulationService>,
    /// `None` = authentication disabled
    pub verifier: Option<Arc<dyn IdentityVerifier>>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "VoiceLogic API is running - the buyer is listening".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the router with shared state
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Protected routes (require authentication when a verifier is configured)
    let protected_routes = routes::simulate::router().layer(middleware::from_fn_with_state(
        state.clone(),
        auth::auth_middleware,
    ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::personas::router())
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎙️  VoiceLogic API initializing...");

    let config = AppConfig::from_lookup(|key| secrets.get(key)).context("Invalid configuration")?;

    // Completion provider (missing key = every simulation answers with the fallback)
    let provider = OpenAiProvider::from_config(&config.llm)
        .context("Failed to initialize completion provider")?
        .map(|provider| {
            tracing::info!(
                "🤖 Completion provider: {} ({})",
                provider.provider_name(),
                provider.model_id()
            );
            Arc::new(provider) as Arc<dyn CompletionProvider>
        });

    if provider.is_none() {
        tracing::warn!("⚠️  No OPENAI_API_KEY set - simulations will fail until configured");
    }

    // Caller authentication
    let verifier: Option<Arc<dyn IdentityVerifier>> = match &config.auth {
        AuthConfig::Disabled => {
            tracing::warn!("⚠️  AUTH_MODE=disabled - /simulate is open to anonymous callers");
            None
        }
        AuthConfig::ApiKey(key) => {
            tracing::info!("🔐 Authentication enabled (AUTH_MODE={})", config.auth.mode());
            Some(Arc::new(StaticTokenVerifier::new(key.clone())) as Arc<dyn IdentityVerifier>)
        }
        AuthConfig::Firebase { web_api_key } => {
            tracing::info!("🔐 Authentication enabled (AUTH_MODE={})", config.auth.mode());
            let verifier = FirebaseTokenVerifier::new(web_api_key.clone())
                .context("Failed to initialize Firebase verifier")?;
            Some(Arc::new(verifier) as Arc<dyn IdentityVerifier>)
        }
    };

    tracing::info!(
        "📝 Prompt templates {} (persona override {})",
        config.templates.version,
        if config.allow_persona_override { "on" } else { "off" }
    );

    let settings = SimulationSettings {
        buyer_temperature: config.llm.buyer_temperature,
        feedback_temperature: config.llm.feedback_temperature,
        allow_persona_override: config.allow_persona_override,
    };

    let cors = config.cors_layer().context("Invalid CORS configuration")?;
    match &config.cors_origins {
        Some(origins) => tracing::info!("🌐 CORS origins: {}", origins.join(", ")),
        None => tracing::info!("🌐 CORS: all origins allowed"),
    }

    // Create application state
    let state = AppState {
        simulation: Arc::new(SimulationService::new(
            provider,
            config.templates.clone(),
            settings,
        )),
        verifier,
    };

    let router = build_router(state, cors);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ VoiceLogic API ready");

    Ok(router.into())
}
