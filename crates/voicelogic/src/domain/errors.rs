//! Domain Errors
//!
//! Error types for domain operations.

use std::time::Duration;

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Rate limited{}", retry_suffix(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn external<E: std::fmt::Display>(err: E) -> Self {
        Self::ExternalService(err.to_string())
    }
}

fn retry_suffix(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(duration) => format!(", retry after {:?}", duration),
        None => String::new(),
    }
}
