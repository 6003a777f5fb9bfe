//! Packet Network Simulator Core - Rust Engine
//!
//! Discrete-time simulation of a small packet-switched network: a dispatcher
//! spreads generated packets over parallel bounded router buffers, and a
//! bandwidth-limited sink drains packets whose transit time has elapsed.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (Packet, RouterBuffer, Dispatcher, State, Events)
//! - **arrivals**: Seeded packet generation
//! - **policy**: Router selection for new packets
//! - **completion**: Bandwidth-limited, fair delivery to the sink
//! - **orchestrator**: Per-tick state machine
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Router buffers never exceed capacity and always dequeue in FIFO order
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Every generated packet is delivered, dropped, or still buffered

// Module declarations
pub mod arrivals;
pub mod completion;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalGenerator};
pub use completion::{Completion, CompletionFairnessQueue};
pub use crate::core::time::{RunPhase, SimulationClock};
pub use models::{
    dispatcher::Dispatcher,
    event::{Event, EventLog},
    packet::{Packet, PacketId, PacketIdAllocator},
    router::{BufferError, BufferSnapshot, RouterBuffer},
    state::SimulationState,
};
pub use orchestrator::{
    FinalStatistics, NetworkConfig, Orchestrator, Placement, SimulationError, TickReport,
};
pub use policy::{LeastLoadedPolicy, RoutingError, RoutingPolicy};
pub use rng::RngManager;
