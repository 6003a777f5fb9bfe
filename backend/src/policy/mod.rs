//! Routing Policy Module
//!
//! Decides which intermediate router receives a packet leaving the dispatcher.
//!
//! # Overview
//!
//! A policy looks at the current occupancy of every router buffer and picks
//! one with room. When every buffer is full it reports
//! [`RoutingError::AllRoutersFull`], which the placement phase turns into a
//! dropped packet. It never ends the run.
//!
//! # Policy Interface
//!
//! All policies implement the `RoutingPolicy` trait:
//! ```rust
//! use packet_simulator_core_rs::policy::{RoutingError, RoutingPolicy};
//! use packet_simulator_core_rs::RouterBuffer;
//!
//! /// Always the first router with room
//! struct FirstFit;
//!
//! impl RoutingPolicy for FirstFit {
//!     fn select_destination(&self, routers: &[RouterBuffer]) -> Result<usize, RoutingError> {
//!         routers
//!             .iter()
//!             .position(|r| !r.is_full())
//!             .ok_or(RoutingError::AllRoutersFull)
//!     }
//! }
//! ```
//!
//! Available policies:
//! 1. **LeastLoaded**: fewest buffered packets among routers with room, lowest index on ties

use crate::models::router::RouterBuffer;
use thiserror::Error;

pub mod least_loaded;

pub use least_loaded::LeastLoadedPolicy;

/// Why a packet could not be placed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// Every router buffer is at capacity
    #[error("All routers are full")]
    AllRoutersFull,
}

/// Placement rule for packets leaving the dispatcher
///
/// Implementations must be deterministic: the same occupancies must give the
/// same answer, or seeded runs stop being reproducible.
pub trait RoutingPolicy {
    /// Pick a router for the next packet
    ///
    /// # Returns
    ///
    /// * `Ok(index)` - position in `routers` of a buffer with spare capacity
    /// * `Err(RoutingError::AllRoutersFull)` - no buffer can take the packet
    fn select_destination(&self, routers: &[RouterBuffer]) -> Result<usize, RoutingError>;

    /// Short name for logs and reports
    fn name(&self) -> &'static str {
        "custom"
    }
}
