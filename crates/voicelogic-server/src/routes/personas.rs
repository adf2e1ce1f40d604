//! Persona Routes - Built-in buyer persona catalog

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};

use voicelogic::Persona;

use crate::models::{PersonaQuery, PersonaResponse};
use crate::AppState;

/// List buyer personas
///
/// GET /personas?difficulty=hard
#[utoipa::path(
    get,
    path = "/personas",
    params(PersonaQuery),
    responses(
        (status = 200, description = "Persona catalog", body = Vec<PersonaResponse>),
        (status = 400, description = "Unknown difficulty")
    ),
    tag = "Personas"
)]
pub async fn list_personas(
    Query(query): Query<PersonaQuery>,
) -> Result<Json<Vec<PersonaResponse>>, (StatusCode, String)> {
    let difficulty = query
        .difficulty()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let personas = Persona::catalog()
        .iter()
        .filter(|p| difficulty.map_or(true, |d| p.difficulty == d))
        .map(PersonaResponse::from)
        .collect();

    Ok(Json(personas))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/personas", get(list_personas))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_catalog() {
        let Json(personas) = list_personas(Query(PersonaQuery::default()))
            .await
            .unwrap();
        assert_eq!(personas.len(), Persona::catalog().len());
        assert_eq!(personas[0].id, "detail_analyst");
        assert_eq!(personas[0].difficulty_label, "HARD");
    }

    #[tokio::test]
    async fn test_filter_by_difficulty() {
        let query = PersonaQuery {
            difficulty: Some("medium".to_string()),
        };
        let Json(personas) = list_personas(Query(query)).await.unwrap();
        let ids: Vec<_> = personas.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["budget_conscious", "decision_maker_rush"]);

        let query = PersonaQuery {
            difficulty: Some("all".to_string()),
        };
        let Json(personas) = list_personas(Query(query)).await.unwrap();
        assert_eq!(personas.len(), 6);
    }

    #[tokio::test]
    async fn test_unknown_difficulty() {
        let query = PersonaQuery {
            difficulty: Some("legendary".to_string()),
        };
        let (status, _) = list_personas(Query(query)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
