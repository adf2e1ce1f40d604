//! Identity Verifier Port
//!
//! Verifies a bearer token against an external identity provider.

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::domain::errors::DomainError;

/// Bearer token verifier
///
/// Any `Err` means the token is invalid or expired; callers do not
/// distinguish between causes.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, DomainError>;

    /// Name used in logs (e.g., "firebase", "api_key")
    fn verifier_name(&self) -> &str;
}
