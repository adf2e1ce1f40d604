//! Shared API key verification (Bearer token compared to a configured key)

use async_trait::async_trait;

use voicelogic::{DomainError, Identity, IdentityVerifier};

pub struct StaticTokenVerifier {
    api_key: String,
}

impl StaticTokenVerifier {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        if !self.api_key.is_empty() && token == self.api_key {
            Ok(Identity::new("api-key", None))
        } else {
            Err(DomainError::Unauthenticated("Invalid API key".to_string()))
        }
    }

    fn verifier_name(&self) -> &str {
        "api_key"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_matching_key() {
        let verifier = StaticTokenVerifier::new("s3cret");
        let identity = verifier.verify("s3cret").await.unwrap();
        assert_eq!(identity.subject(), "api-key");
    }

    #[tokio::test]
    async fn test_wrong_or_empty_key() {
        let verifier = StaticTokenVerifier::new("s3cret");
        assert!(verifier.verify("guess").await.is_err());

        let verifier = StaticTokenVerifier::new("");
        assert!(verifier.verify("").await.is_err());
    }
}
