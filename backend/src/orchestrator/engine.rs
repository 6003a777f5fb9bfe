//! Orchestrator Engine
//!
//! Main simulation loop tying the network components together:
//! - Packet arrivals (seeded Bernoulli trials)
//! - Placement into router buffers (routing policy)
//! - Head-of-line transit countdown
//! - Bandwidth-limited delivery to the sink (fairness queue)
//! - Aggregate accounting and event logging
//!
//! # Architecture
//!
//! ```text
//! For each tick t in 1..=duration:
//! 1. Age every buffered packet (time in network + 1)
//! 2. Generate arrivals into the dispatcher
//! 3. Place dispatcher packets (or drop when all routers are full)
//! 4. Count down the head packet of every router
//! 5. Queue routers whose head became ready
//! 6. Drain up to `bandwidth` ready heads to the sink
//! 7. Snapshot router occupancy into the tick report
//! ```
//!
//! The phase order is part of the model: packets placed in phase 3 are not
//! aged until the next tick, so their countdown never starts on the tick
//! they arrive.
//!
//! # Example
//!
//! ```rust
//! use packet_simulator_core_rs::orchestrator::{NetworkConfig, Orchestrator};
//!
//! let config = NetworkConfig {
//!     num_intermediate_routers: 1,
//!     arrival_probability: 1.0,
//!     router_buffer_capacity: 2,
//!     min_packet_size: 100,
//!     max_packet_size: 101,
//!     bandwidth: 1,
//!     duration: 1,
//!     arrival_trials: 3,
//!     rng_seed: 12345,
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! let report = orchestrator.tick().unwrap();
//!
//! assert_eq!(report.num_generated(), 3);
//! assert_eq!(report.num_placed(), 2);
//! assert_eq!(report.num_dropped(), 1);
//! assert!(orchestrator.is_finished());
//! assert_eq!(orchestrator.final_statistics().mean_service_time, None);
//! ```

use crate::arrivals::{ArrivalConfig, ArrivalGenerator, DEFAULT_ARRIVAL_TRIALS};
use crate::completion::{Completion, CompletionFairnessQueue};
use crate::core::time::{RunPhase, SimulationClock};
use crate::models::dispatcher::Dispatcher;
use crate::models::event::{Event, EventLog};
use crate::models::packet::{Packet, PacketId, PacketIdAllocator};
use crate::models::router::{BufferError, BufferSnapshot, RouterBuffer};
use crate::models::state::SimulationState;
use crate::policy::{LeastLoadedPolicy, RoutingError, RoutingPolicy};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

// ============================================================================
// Configuration Types
// ============================================================================

fn default_arrival_trials() -> usize {
    DEFAULT_ARRIVAL_TRIALS
}

/// Complete network configuration
///
/// Built by the CLI from flags or a JSON file and consumed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of parallel intermediate routers
    pub num_intermediate_routers: usize,

    /// Success probability of each arrival trial, in [0, 1]
    pub arrival_probability: f64,

    /// Packets each router can buffer
    pub router_buffer_capacity: usize,

    /// Smallest packet size in bytes (inclusive)
    pub min_packet_size: usize,

    /// Largest packet size in bytes (exclusive)
    pub max_packet_size: usize,

    /// Packets the sink accepts per tick
    pub bandwidth: usize,

    /// Ticks to simulate
    pub duration: usize,

    /// Arrival trials per tick
    #[serde(default = "default_arrival_trials")]
    pub arrival_trials: usize,

    /// RNG seed for deterministic simulation (0 selects the default seed)
    #[serde(default)]
    pub rng_seed: u64,
}

impl NetworkConfig {
    /// Parse a configuration from JSON
    ///
    /// Missing `arrival_trials` and `rng_seed` fall back to their defaults.
    /// The result is not validated; [`Orchestrator::new`] does that.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::InvalidConfig(e.to_string()))
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |msg: &str| -> Result<(), SimulationError> {
            Err(SimulationError::InvalidConfig(msg.to_string()))
        };

        if self.num_intermediate_routers == 0 {
            return invalid("num_intermediate_routers must be > 0");
        }
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return invalid("arrival_probability must be within [0, 1]");
        }
        if self.router_buffer_capacity == 0 {
            return invalid("router_buffer_capacity must be > 0");
        }
        if self.min_packet_size == 0 {
            return invalid("min_packet_size must be > 0");
        }
        if self.min_packet_size >= self.max_packet_size {
            return invalid("min_packet_size must be less than max_packet_size");
        }
        if self.bandwidth == 0 {
            return invalid("bandwidth must be > 0");
        }
        if self.duration == 0 {
            return invalid("duration must be > 0");
        }
        if self.arrival_trials == 0 {
            return invalid("arrival_trials must be > 0");
        }

        Ok(())
    }

    /// Arrival process parameters
    pub fn arrival_config(&self) -> ArrivalConfig {
        ArrivalConfig {
            trials: self.arrival_trials,
            probability: self.arrival_probability,
            min_size: self.min_packet_size,
            max_size: self.max_packet_size,
        }
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Where a packet was placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub packet_id: PacketId,
    /// Router number (1-based)
    pub router: usize,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: usize,

    /// Packets created this tick, as generated
    pub generated: Vec<Packet>,

    /// Successful placements, in dispatch order
    pub placements: Vec<Placement>,

    /// Packets dropped because every router was full
    pub dropped: Vec<PacketId>,

    /// Packets delivered to the sink, in service order
    pub completed: Vec<Completion>,

    /// Router contents at the end of the tick
    pub buffer_snapshots: Vec<BufferSnapshot>,
}

impl TickReport {
    pub fn num_generated(&self) -> usize {
        self.generated.len()
    }

    pub fn num_placed(&self) -> usize {
        self.placements.len()
    }

    pub fn num_dropped(&self) -> usize {
        self.dropped.len()
    }

    pub fn num_completed(&self) -> usize {
        self.completed.len()
    }
}

/// Summary of a run (or the run so far)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStatistics {
    pub ticks_elapsed: usize,
    pub total_generated: u64,
    pub total_arrived: u64,
    pub total_dropped: u64,
    /// Packets still buffered in routers
    pub in_flight: u64,
    pub total_service_time: u64,
    /// `total_service_time / total_arrived`, `None` when nothing arrived
    pub mean_service_time: Option<f64>,
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Simulation already finished after {duration} ticks")]
    AlreadyFinished { duration: usize },

    #[error("Routing policy chose router index {index} but only {num_routers} exist")]
    InvalidDestination { index: usize, num_routers: usize },

    #[error("Router buffer invariant violated: {0}")]
    Buffer(#[from] BufferError),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator owning all state of one simulation run
///
/// # Determinism
///
/// All randomness is via `rng_manager` with seeded xorshift64*.
/// Same seed + same config = identical tick reports.
pub struct Orchestrator {
    config: NetworkConfig,

    clock: SimulationClock,

    /// Deterministic RNG
    rng_manager: RngManager,

    packet_ids: PacketIdAllocator,

    arrival_generator: ArrivalGenerator,

    dispatcher: Dispatcher,

    /// Router buffers; index `i` is router number `i + 1`
    routers: Vec<RouterBuffer>,

    policy: Box<dyn RoutingPolicy>,

    fairness: CompletionFairnessQueue,

    state: SimulationState,

    event_log: EventLog,
}

impl Orchestrator {
    /// Create a fresh run using least-loaded placement
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Idle engine at tick 0
    /// * `Err(SimulationError::InvalidConfig)` - Configuration validation failed
    pub fn new(config: NetworkConfig) -> Result<Self, SimulationError> {
        Self::with_policy(config, Box::new(LeastLoadedPolicy::new()))
    }

    /// Create a fresh run with a caller-supplied placement rule
    pub fn with_policy(
        config: NetworkConfig,
        policy: Box<dyn RoutingPolicy>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let routers = (1..=config.num_intermediate_routers)
            .map(|id| RouterBuffer::new(id, config.router_buffer_capacity))
            .collect();

        debug!(
            routers = config.num_intermediate_routers,
            capacity = config.router_buffer_capacity,
            bandwidth = config.bandwidth,
            duration = config.duration,
            policy = policy.name(),
            "initialized network"
        );

        Ok(Self {
            clock: SimulationClock::new(config.duration),
            rng_manager: RngManager::new(config.rng_seed),
            packet_ids: PacketIdAllocator::new(),
            arrival_generator: ArrivalGenerator::new(config.arrival_config()),
            dispatcher: Dispatcher::new(),
            routers,
            policy,
            fairness: CompletionFairnessQueue::new(config.num_intermediate_routers),
            state: SimulationState::new(),
            event_log: EventLog::new(),
            config,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Number of the last executed tick (0 before the first)
    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn phase(&self) -> RunPhase {
        self.clock.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn routers(&self) -> &[RouterBuffer] {
        &self.routers
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn fairness_queue(&self) -> &CompletionFairnessQueue {
        &self.fairness
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Packets currently buffered across all routers
    pub fn in_flight(&self) -> u64 {
        self.routers.iter().map(|r| r.len() as u64).sum()
    }

    /// Aggregate statistics so far
    pub fn final_statistics(&self) -> FinalStatistics {
        FinalStatistics {
            ticks_elapsed: self.clock.current_tick(),
            total_generated: self.state.total_generated(),
            total_arrived: self.state.total_arrived(),
            total_dropped: self.state.total_dropped(),
            in_flight: self.in_flight(),
            total_service_time: self.state.total_service_time(),
            mean_service_time: self.state.mean_service_time(),
        }
    }

    /// Verify every generated packet is delivered, dropped, or still buffered
    pub fn check_conservation(&self) -> Result<(), SimulationError> {
        let accounted = self.state.total_arrived()
            + self.state.total_dropped()
            + self.in_flight()
            + self.dispatcher.len() as u64;

        if accounted != self.state.total_generated() {
            return Err(SimulationError::InvariantViolation(format!(
                "generated {} packets but {} are accounted for",
                self.state.total_generated(),
                accounted
            )));
        }
        Ok(())
    }

    /// Place a packet directly into router `index`, bypassing arrivals
    ///
    /// The packet counts as generated so conservation still holds.
    #[cfg(test)]
    pub(crate) fn inject_packet(
        &mut self,
        index: usize,
        packet: Packet,
    ) -> Result<(), SimulationError> {
        self.routers[index].enqueue(packet)?;
        self.state.record_generated(1);
        Ok(())
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// # Returns
    ///
    /// * `Ok(TickReport)` - Tick executed
    /// * `Err(SimulationError::AlreadyFinished)` - `duration` ticks already ran
    /// * `Err(_)` - any other error means a broken invariant, not a network condition
    pub fn tick(&mut self) -> Result<TickReport, SimulationError> {
        if self.clock.is_finished() {
            return Err(SimulationError::AlreadyFinished {
                duration: self.clock.duration(),
            });
        }
        let tick = self.clock.advance_tick();

        // STEP 1: AGE
        for router in self.routers.iter_mut() {
            router.increment_all_time_in_network();
        }

        // STEP 2: ARRIVALS
        let generated = self.generate_arrivals(tick);

        // STEP 3: PLACEMENT
        let (placements, dropped) = self.place_packets(tick)?;

        // STEP 4: TRANSIT COUNTDOWN
        for router in self.routers.iter_mut() {
            router.decrement_head_transit_time();
        }

        // STEP 5: READINESS
        self.fairness.mark_all_ready(&self.routers);

        // STEP 6: DELIVERY
        let completed = self.drain_completions(tick)?;

        // STEP 7: REPORT
        let buffer_snapshots = self.routers.iter().map(RouterBuffer::snapshot).collect();

        debug_assert_eq!(self.check_conservation(), Ok(()));
        debug!(
            tick,
            generated = generated.len(),
            placed = placements.len(),
            dropped = dropped.len(),
            delivered = completed.len(),
            in_flight = self.in_flight(),
            "tick complete"
        );

        Ok(TickReport {
            tick,
            generated,
            placements,
            dropped,
            completed,
            buffer_snapshots,
        })
    }

    /// Step until `duration` ticks have run
    ///
    /// Returns the reports of the ticks executed by this call.
    pub fn run_to_completion(&mut self) -> Result<Vec<TickReport>, SimulationError> {
        let mut reports = Vec::new();
        while !self.clock.is_finished() {
            reports.push(self.tick()?);
        }
        Ok(reports)
    }

    /// STEP 2: run the arrival trials and queue new packets at the dispatcher
    fn generate_arrivals(&mut self, tick: usize) -> Vec<Packet> {
        let generated =
            self.arrival_generator
                .generate(tick, &mut self.rng_manager, &mut self.packet_ids);
        self.state.record_generated(generated.len());

        for packet in &generated {
            self.event_log.log(Event::PacketGenerated {
                tick,
                packet_id: packet.id(),
                size: packet.size(),
            });
            self.dispatcher.enqueue(packet.clone());
        }

        generated
    }

    /// STEP 3: empty the dispatcher into the routers
    fn place_packets(
        &mut self,
        tick: usize,
    ) -> Result<(Vec<Placement>, Vec<PacketId>), SimulationError> {
        let mut placements = Vec::new();
        let mut dropped = Vec::new();

        while let Some(packet) = self.dispatcher.dequeue() {
            let packet_id = packet.id();

            match self.policy.select_destination(&self.routers) {
                Ok(index) => {
                    let num_routers = self.routers.len();
                    let router = self
                        .routers
                        .get_mut(index)
                        .ok_or(SimulationError::InvalidDestination { index, num_routers })?;
                    debug_assert!(
                        !router.is_full(),
                        "routing policy chose full router {}",
                        router.id()
                    );
                    router.enqueue(packet)?;

                    trace!(tick, packet_id, router = router.id(), "packet routed");
                    self.event_log.log(Event::PacketRouted {
                        tick,
                        packet_id,
                        router: router.id(),
                    });
                    placements.push(Placement {
                        packet_id,
                        router: router.id(),
                    });
                }
                Err(RoutingError::AllRoutersFull) => {
                    trace!(tick, packet_id, "all routers full, packet dropped");
                    self.state.record_drop();
                    self.event_log.log(Event::PacketDropped { tick, packet_id });
                    dropped.push(packet_id);
                }
            }
        }

        Ok((placements, dropped))
    }

    /// STEP 6: deliver up to `bandwidth` ready packets and account for them
    fn drain_completions(&mut self, tick: usize) -> Result<Vec<Completion>, SimulationError> {
        let completed = self
            .fairness
            .drain(&mut self.routers, self.config.bandwidth)?;

        for completion in &completed {
            let packet = &completion.packet;
            trace!(
                tick,
                packet_id = packet.id(),
                router = completion.router,
                time_in_network = packet.time_in_network(),
                "packet delivered"
            );
            self.state.record_arrival(packet);
            self.event_log.log(Event::PacketDelivered {
                tick,
                packet_id: packet.id(),
                router: completion.router,
                time_in_network: packet.time_in_network(),
            });
        }

        Ok(completed)
    }
}

// Manual Debug implementation (policies don't implement Debug)
impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("current_tick", &self.current_tick())
            .field("duration", &self.config.duration)
            .field("policy", &self.policy.name())
            .field("num_routers", &self.routers.len())
            .field("in_flight", &self.in_flight())
            .field("event_count", &self.event_log.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
