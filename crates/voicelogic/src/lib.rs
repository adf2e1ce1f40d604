//! VoiceLogic Domain Library
//!
//! Core domain types and interfaces for the VoiceLogic buyer simulator.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Request-scoped models (Pitch, BuyerReply, Identity, Persona)
//!   - `value_objects/`: Immutable value types (Difficulty)
//!   - `prompts`: Versioned prompt templates
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Completion provider and identity verifier interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use voicelogic::domain::{Pitch, PromptTemplates};
//! use voicelogic::ports::CompletionProvider;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    BuyerReply, Difficulty, DomainError, Identity, Persona, PersonaChoice, Pitch,
    PromptTemplates, SimulationRequest, SimulationResult,
};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionProvider, CompletionResponse, IdentityVerifier,
    MessageRole, TokenUsage,
};
