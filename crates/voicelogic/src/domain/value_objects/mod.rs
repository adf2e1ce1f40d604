//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod difficulty;

pub use difficulty::*;
