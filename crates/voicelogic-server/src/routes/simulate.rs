//! Simulate Route - Buyer reply plus coaching feedback for one pitch

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use tracing::Instrument;
use uuid::Uuid;

use voicelogic::Identity;

use crate::application::SimulationError;
use crate::models::{ErrorDetail, SimulateRequest, SimulateResponse, INVALID_BODY_DETAIL};
use crate::AppState;

impl IntoResponse for SimulationError {
    fn into_response(self) -> Response {
        match self {
            SimulationError::EmptyInput => {
                (StatusCode::BAD_REQUEST, Json(SimulateResponse::empty_input())).into_response()
            }
            SimulationError::UnknownPersona(message) => (
                StatusCode::BAD_REQUEST,
                Json(SimulateResponse::unknown_persona(message)),
            )
                .into_response(),
            // Details were logged by the service; the body stays generic.
            SimulationError::ProviderFailure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SimulateResponse::provider_failure()),
            )
                .into_response(),
        }
    }
}

/// Body that could not be read as a `SimulateRequest`
struct InvalidBody(JsonRejection);

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0.body_text(), "Rejected /simulate body");
        (self.0.status(), Json(ErrorDetail::new(INVALID_BODY_DETAIL))).into_response()
    }
}

/// Simulate a buyer reply and coach the salesperson
#[utoipa::path(
    post,
    path = "/simulate",
    request_body = SimulateRequest,
    responses(
        (status = 200, description = "Buyer reply and feedback", body = SimulateResponse),
        (status = 400, description = "Empty pitch or unknown persona", body = SimulateResponse),
        (status = 401, description = "Missing, invalid or expired bearer token", body = ErrorDetail),
        (status = 422, description = "Body is not a valid simulate request", body = ErrorDetail),
        (status = 500, description = "AI service temporarily unavailable", body = SimulateResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Simulation"
)]
pub async fn simulate(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return InvalidBody(rejection).into_response(),
    };

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("simulate", %request_id);
    let identity = identity.map(|Extension(identity)| identity);

    async move {
        tracing::debug!(state = "received", "Simulation request received");
        let result = state
            .simulation
            .simulate(payload.into(), identity.as_ref())
            .await?;
        tracing::debug!(state = "completed", "Simulation response sent");
        Ok::<_, SimulationError>(Json(SimulateResponse::from(result)))
    }
    .instrument(span)
    .await
    .into_response()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/simulate", post(simulate))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use tower::ServiceExt;
    use voicelogic::{CompletionProvider, IdentityVerifier, PromptTemplates};

    use super::*;
    use crate::application::{SimulationService, SimulationSettings};
    use crate::models::{
        EMPTY_INPUT_FEEDBACK, FALLBACK_BUYER_REPLY, FALLBACK_FEEDBACK, INVALID_TOKEN_DETAIL,
        MISSING_AUTH_DETAIL,
    };
    use crate::test_support::{FakeVerifier, ScriptedProvider};

    const PITCH: &str = "This house has a great view and a new roof.";
    const REPLY: &str = "Sounds nice, but what's the price?";
    const FEEDBACK: &str = "Good opening, ask about budget next.";

    fn app(provider: Arc<ScriptedProvider>, verifier: Option<Arc<FakeVerifier>>) -> Router {
        let provider: Arc<dyn CompletionProvider> = provider;
        let verifier = verifier.map(|v| v as Arc<dyn IdentityVerifier>);
        let state = AppState {
            simulation: Arc::new(SimulationService::new(
                Some(provider),
                PromptTemplates::default(),
                SimulationSettings::default(),
            )),
            verifier,
        };
        crate::build_router(state, tower_http::cors::CorsLayer::permissive())
    }

    fn post_json(body: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/simulate")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_simulate_example() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, body) = send(
            app(provider.clone(), None),
            post_json(&serde_json::json!({ "user_text": PITCH }).to_string(), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({ "buyer_reply": REPLY, "feedback": FEEDBACK })
        );
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_pitch_is_400() {
        for text in ["", "   ", "\n\t "] {
            let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
            let (status, body) = send(
                app(provider.clone(), None),
                post_json(&serde_json::json!({ "user_text": text }).to_string(), None),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["buyer_reply"], "");
            assert_eq!(body["feedback"], EMPTY_INPUT_FEEDBACK);
            assert_eq!(provider.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error() {
        for body in [r#"{"persona_id": "ghost"}"#, r#"{"user_text": null}"#] {
            let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
            let (status, json) = send(app(provider.clone(), None), post_json(body, None)).await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
            assert_eq!(json["detail"], INVALID_BODY_DETAIL);
            assert_eq!(provider.call_count(), 0);
        }

        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, json) = send(app(provider, None), post_json("{not json", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], INVALID_BODY_DETAIL);
    }

    #[tokio::test]
    async fn test_unknown_persona_is_400() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, body) = send(
            app(provider.clone(), None),
            post_json(
                &serde_json::json!({ "user_text": PITCH, "persona_id": "ghost" }).to_string(),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["buyer_reply"], "");
        assert_eq!(body["feedback"], "Unknown buyer persona: ghost");
    }

    #[tokio::test]
    async fn test_provider_failure_on_either_call_is_generic_500() {
        for fail_first in [true, false] {
            let provider = ScriptedProvider::replying(&[]);
            if fail_first {
                provider.push_err("sk-secret leaked in upstream error");
            } else {
                provider.push_ok(REPLY);
                provider.push_err("sk-secret leaked in upstream error");
            }

            let (status, body) = send(
                app(provider.clone(), None),
                post_json(&serde_json::json!({ "user_text": PITCH }).to_string(), None),
            )
            .await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body,
                serde_json::json!({
                    "buyer_reply": FALLBACK_BUYER_REPLY,
                    "feedback": FALLBACK_FEEDBACK
                })
            );
            assert!(!body.to_string().contains("sk-secret"));
        }
    }

    #[tokio::test]
    async fn test_missing_provider_key_is_500() {
        let state = AppState {
            simulation: Arc::new(SimulationService::new(
                None,
                PromptTemplates::default(),
                SimulationSettings::default(),
            )),
            verifier: None,
        };
        let app = crate::build_router(state, tower_http::cors::CorsLayer::permissive());

        let (status, body) = send(
            app,
            post_json(&serde_json::json!({ "user_text": PITCH }).to_string(), None),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["buyer_reply"], FALLBACK_BUYER_REPLY);
    }

    #[tokio::test]
    async fn test_auth_missing_header_is_401_before_provider() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, body) = send(
            app(provider.clone(), Some(FakeVerifier::accepting("good-token"))),
            post_json(&serde_json::json!({ "user_text": PITCH }).to_string(), None),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "detail": MISSING_AUTH_DETAIL }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_auth_rejected_token_is_401() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, body) = send(
            app(provider.clone(), Some(FakeVerifier::accepting("good-token"))),
            post_json(
                &serde_json::json!({ "user_text": PITCH }).to_string(),
                Some("stale-token"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "detail": INVALID_TOKEN_DETAIL }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_auth_checked_before_input_validation() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, _) = send(
            app(provider.clone(), Some(FakeVerifier::accepting("good-token"))),
            post_json(&serde_json::json!({ "user_text": "" }).to_string(), None),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_valid_token_succeeds() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, body) = send(
            app(provider.clone(), Some(FakeVerifier::accepting("good-token"))),
            post_json(
                &serde_json::json!({ "user_text": PITCH }).to_string(),
                Some("good-token"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["buyer_reply"], REPLY);
        // Identity is for logging only; prompts never mention the caller.
        assert!(provider
            .calls()
            .iter()
            .all(|c| !c.user().contains("seller@example.com")));
    }

    #[tokio::test]
    async fn test_custom_persona_over_http() {
        let provider = ScriptedProvider::replying(&[REPLY, FEEDBACK]);
        let (status, _) = send(
            app(provider.clone(), None),
            post_json(
                &serde_json::json!({
                    "user_text": PITCH,
                    "persona_prompt": "You are a first-time buyer on a tight budget."
                })
                .to_string(),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            provider.calls()[0].system(),
            "You are a first-time buyer on a tight budget."
        );
    }
}
