//! Arrival generation module for deterministic packet creation.
//!
//! Each tick the dispatcher is fed by a fixed number of independent input
//! lines. Every line is a Bernoulli trial that produces one packet with the
//! configured probability. Packet sizes are drawn uniformly from
//! `[min_size, max_size)`.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config → same arrivals
//! 2. **Draw order**: one draw per trial, plus one size draw per success
//! 3. **Owned ids**: identifiers come from the caller's allocator, never a global
//!
//! # Example
//!
//! ```
//! use packet_simulator_core_rs::arrivals::{ArrivalConfig, ArrivalGenerator};
//! use packet_simulator_core_rs::{PacketIdAllocator, RngManager};
//!
//! let generator = ArrivalGenerator::new(ArrivalConfig {
//!     trials: 3,
//!     probability: 1.0,
//!     min_size: 100,
//!     max_size: 101,
//! });
//! let mut rng = RngManager::new(42);
//! let mut ids = PacketIdAllocator::new();
//!
//! let packets = generator.generate(1, &mut rng, &mut ids);
//! assert_eq!(packets.len(), 3);
//! assert!(packets.iter().all(|p| p.size() == 100 && p.remaining_transit_time() == 1));
//! ```

use crate::models::packet::{Packet, PacketIdAllocator};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Independent input lines feeding the dispatcher each tick
pub const DEFAULT_ARRIVAL_TRIALS: usize = 3;

/// Configuration of the arrival process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// Bernoulli trials per tick
    pub trials: usize,

    /// Success probability of each trial, in [0, 1]
    pub probability: f64,

    /// Smallest packet size (inclusive)
    pub min_size: usize,

    /// Largest packet size (exclusive)
    pub max_size: usize,
}

/// Generator for packet arrivals.
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    config: ArrivalConfig,
}

impl ArrivalGenerator {
    /// Create a new arrival generator.
    ///
    /// # Panics
    ///
    /// Panics if `min_size >= max_size`
    pub fn new(config: ArrivalConfig) -> Self {
        assert!(
            config.min_size < config.max_size,
            "min_size must be less than max_size"
        );
        Self { config }
    }

    pub fn config(&self) -> &ArrivalConfig {
        &self.config
    }

    /// Run this tick's arrival trials
    ///
    /// # Returns
    ///
    /// Packets created this tick, in trial order
    pub fn generate(
        &self,
        tick: usize,
        rng: &mut RngManager,
        ids: &mut PacketIdAllocator,
    ) -> Vec<Packet> {
        let mut packets = Vec::new();

        for _ in 0..self.config.trials {
            if rng.chance(self.config.probability) {
                packets.push(self.sample_packet(tick, rng, ids));
            }
        }

        packets
    }

    /// Create one packet with a uniformly drawn size
    pub fn sample_packet(
        &self,
        tick: usize,
        rng: &mut RngManager,
        ids: &mut PacketIdAllocator,
    ) -> Packet {
        let size = rng.range(self.config.min_size, self.config.max_size);
        Packet::new(ids.next_id(), size, tick)
    }
}
