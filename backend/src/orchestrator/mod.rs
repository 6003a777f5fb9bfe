//! Orchestrator - main simulation loop
//!
//! Implements the per-tick state machine integrating arrivals, placement,
//! transit countdown and bandwidth-limited delivery.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{
    FinalStatistics, NetworkConfig, Orchestrator, Placement, SimulationError, TickReport,
};
