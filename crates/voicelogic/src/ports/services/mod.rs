//! Service Ports
//!
//! Abstract interfaces for external services.

mod completion_provider;
mod identity_verifier;

pub use completion_provider::*;
pub use identity_verifier::*;
