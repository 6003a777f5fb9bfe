//! Simulation State
//!
//! Aggregate counters for a run: how many packets were generated, how many
//! reached the sink, how many were dropped at placement, and the total time
//! delivered packets spent in the network.
//!
//! # Critical Invariants
//!
//! 1. **Conservation**: `generated == arrived + dropped + in_flight` at every tick boundary
//! 2. **Monotonic**: counters only ever increase
//! 3. **Single outcome**: each generated packet is dropped at most once and arrives at most once

use crate::models::packet::Packet;
use serde::{Deserialize, Serialize};

/// Aggregate statistics of a simulation run
///
/// # Example
///
/// ```rust
/// use packet_simulator_core_rs::SimulationState;
///
/// let state = SimulationState::new();
/// assert_eq!(state.total_arrived(), 0);
/// assert_eq!(state.mean_service_time(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Packets created by the arrival process
    total_generated: u64,

    /// Packets delivered to the sink
    total_arrived: u64,

    /// Packets discarded because every router was full
    total_dropped: u64,

    /// Sum of `time_in_network` over delivered packets
    total_service_time: u64,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_generated(&mut self, count: usize) {
        self.total_generated += count as u64;
    }

    pub fn record_drop(&mut self) {
        self.total_dropped += 1;
    }

    /// Account for a packet handed to the sink
    pub fn record_arrival(&mut self, packet: &Packet) {
        self.total_arrived += 1;
        self.total_service_time += packet.time_in_network() as u64;
    }

    pub fn total_generated(&self) -> u64 {
        self.total_generated
    }

    pub fn total_arrived(&self) -> u64 {
        self.total_arrived
    }

    pub fn total_dropped(&self) -> u64 {
        self.total_dropped
    }

    pub fn total_service_time(&self) -> u64 {
        self.total_service_time
    }

    /// Packets generated but neither delivered nor dropped yet
    pub fn unresolved(&self) -> u64 {
        self.total_generated - self.total_arrived - self.total_dropped
    }

    /// Average network time per delivered packet
    ///
    /// `None` when nothing has arrived, since the mean is undefined.
    pub fn mean_service_time(&self) -> Option<f64> {
        if self.total_arrived == 0 {
            None
        } else {
            Some(self.total_service_time as f64 / self.total_arrived as f64)
        }
    }
}
