//! Bearer Token Authentication
//!
//! Extracts `Authorization: Bearer <token>` and hands the token to the
//! configured `IdentityVerifier`. The verified `Identity` is attached to the
//! request extensions for logging. No verifier configured = auth disabled.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{ErrorDetail, INVALID_TOKEN_DETAIL, MISSING_AUTH_DETAIL};
use crate::AppState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header")]
    MissingHeader,

    #[error("Token verification failed")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let detail = match self {
            AuthError::MissingHeader => MISSING_AUTH_DETAIL,
            AuthError::InvalidToken => INVALID_TOKEN_DETAIL,
        };
        (StatusCode::UNAUTHORIZED, Json(ErrorDetail::new(detail))).into_response()
    }
}

/// Pull the token out of a `Bearer` Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingHeader)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MissingHeader)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    Ok(token)
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(verifier) = state.verifier.clone() else {
        return Ok(next.run(request).await);
    };

    let token = match bearer_token(request.headers()) {
        Ok(token) => token.to_string(),
        Err(e) => {
            tracing::warn!(state = "unauthenticated", "Missing or malformed Authorization header");
            return Err(e);
        }
    };

    match verifier.verify(&token).await {
        Ok(identity) => {
            tracing::debug!(
                state = "authenticated",
                verifier = verifier.verifier_name(),
                subject = identity.subject(),
                "Caller authenticated"
            );
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!(
                state = "unauthenticated",
                verifier = verifier.verifier_name(),
                error = %e,
                "Token verification failed"
            );
            Err(AuthError::InvalidToken)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(bearer_token(&headers_with("bearer   tok ")), Ok("tok"));
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingHeader));
        assert_eq!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthError::MissingHeader)
        );
        assert_eq!(bearer_token(&headers_with("Bearer")), Err(AuthError::MissingHeader));
        assert_eq!(bearer_token(&headers_with("Bearer    ")), Err(AuthError::MissingHeader));
    }
}
