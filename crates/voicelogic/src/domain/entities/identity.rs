//! Identity - Verified caller principal

use serde::{Deserialize, Serialize};

/// A principal attached to a request after bearer token verification.
///
/// Lives for one request and is only used for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }

    /// Email when known, otherwise the uid
    pub fn subject(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.uid)
    }
}
