//! Simulation clock
//!
//! The network advances in discrete ticks. A run starts idle at tick 0,
//! executes ticks `1..=duration`, and is finished once the last tick has run.

use serde::{Deserialize, Serialize};

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No tick has executed yet
    Idle,
    /// At least one tick has executed and more remain
    Running,
    /// `duration` ticks have executed
    Finished,
}

/// Discrete clock bounded by a fixed run duration
///
/// # Example
/// ```
/// use packet_simulator_core_rs::{RunPhase, SimulationClock};
///
/// let mut clock = SimulationClock::new(2);
/// assert_eq!(clock.phase(), RunPhase::Idle);
///
/// clock.advance_tick();
/// assert_eq!(clock.current_tick(), 1);
/// assert_eq!(clock.phase(), RunPhase::Running);
///
/// clock.advance_tick();
/// assert!(clock.is_finished());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Ticks executed so far
    current_tick: usize,
    /// Total ticks in the run
    duration: usize,
}

impl SimulationClock {
    /// Create a clock for a run of `duration` ticks
    ///
    /// # Panics
    /// Panics if `duration` is zero
    pub fn new(duration: usize) -> Self {
        assert!(duration > 0, "duration must be positive");
        Self {
            current_tick: 0,
            duration,
        }
    }

    /// Advance to the next tick and return its number
    ///
    /// # Panics
    /// Panics if the run is already finished
    pub fn advance_tick(&mut self) -> usize {
        assert!(!self.is_finished(), "cannot advance a finished clock");
        self.current_tick += 1;
        self.current_tick
    }

    /// Number of the most recently started tick (0 before the first)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Total ticks in the run
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Ticks still to execute
    pub fn remaining_ticks(&self) -> usize {
        self.duration - self.current_tick
    }

    pub fn is_finished(&self) -> bool {
        self.current_tick == self.duration
    }

    pub fn phase(&self) -> RunPhase {
        if self.current_tick == 0 {
            RunPhase::Idle
        } else if self.is_finished() {
            RunPhase::Finished
        } else {
            RunPhase::Running
        }
    }
}
