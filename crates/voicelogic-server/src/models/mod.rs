//! VoiceLogic API Models
//!
//! - Simulation: request/response bodies for `/simulate`
//! - Persona: catalog entries for `/personas`

mod persona;
mod simulation;

pub use persona::*;
pub use simulation::*;
