//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod api_key;
pub mod firebase;
pub mod openai;

// Re-exports
pub use api_key::StaticTokenVerifier;
pub use firebase::FirebaseTokenVerifier;
pub use openai::OpenAiProvider;
