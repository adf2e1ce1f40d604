//! Firebase ID token verification
//!
//! Uses the Identity Toolkit `accounts:lookup` endpoint: a valid, unexpired
//! ID token resolves to the account that owns it, anything else is an error.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use voicelogic::{DomainError, Identity, IdentityVerifier};

const BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct FirebaseTokenVerifier {
    client: Client,
    web_api_key: String,
}

impl FirebaseTokenVerifier {
    pub fn new(web_api_key: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            web_api_key: web_api_key.into(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
}

#[async_trait]
impl IdentityVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        let url = format!("{}/accounts:lookup", BASE_URL);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.web_api_key.as_str())])
            .json(&LookupRequest { id_token: token })
            .send()
            .await
            .map_err(DomainError::external)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Unauthenticated(format!(
                "Token lookup failed ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let payload: LookupResponse = response.json().await.map_err(DomainError::external)?;
        identity_from_lookup(payload)
    }

    fn verifier_name(&self) -> &str {
        "firebase"
    }
}

fn identity_from_lookup(payload: LookupResponse) -> Result<Identity, DomainError> {
    let user = payload
        .users
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Unauthenticated("No account for token".to_string()))?;

    if user.disabled {
        return Err(DomainError::Unauthenticated(format!(
            "Account {} is disabled",
            user.local_id
        )));
    }

    Ok(Identity::new(user.local_id, user.email))
}
