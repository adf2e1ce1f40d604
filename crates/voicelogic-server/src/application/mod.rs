//! Application Layer (Use Cases)
//!
//! Orchestrates the buyer simulation between the domain and the
//! completion provider.

mod simulation_service;

pub use simulation_service::{SimulationError, SimulationService, SimulationSettings};
