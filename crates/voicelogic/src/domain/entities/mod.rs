//! Domain Entities
//!
//! Request-scoped models; nothing here is persisted.
//! - Pitch / BuyerReply / SimulationResult: one simulation round
//! - Identity: verified caller principal
//! - Persona: built-in buyer personas

mod identity;
mod persona;
mod simulation;

pub use identity::*;
pub use persona::*;
pub use simulation::*;
