//! xorshift64* random number generator
//!
//! Fast deterministic PRNG with 64-bit state. Every random decision in a
//! run (arrival trials, packet sizes) draws from one `RngManager`, so the
//! same seed replays the same network traffic tick for tick.

use serde::{Deserialize, Serialize};

/// Seed used when a configuration asks for seed 0
pub const DEFAULT_SEED: u64 = 0x5EED_0F_7A_C4E7;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use packet_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let size = rng.range(100, 500); // [100, 500)
/// assert!((100..500).contains(&size));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by [`DEFAULT_SEED`] since xorshift
    /// never leaves the all-zero state.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as usize
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli trial: true with probability `p`
    ///
    /// `p >= 1.0` always succeeds and `p <= 0.0` never does, and both
    /// still consume one draw so trial counts stay aligned across seeds.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Current internal state (replaying from it reproduces the sequence)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
