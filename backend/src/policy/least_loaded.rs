//! Least-Loaded Policy
//!
//! Baseline load balancer: send each packet to the router with the fewest
//! buffered packets among those with spare capacity.
//!
//! # Behavior
//!
//! - Single left-to-right scan over the routers
//! - Full routers are never chosen
//! - Ties go to the lowest index (first found), so placement is deterministic
//! - All routers full yields `AllRoutersFull`

use super::{RoutingError, RoutingPolicy};
use crate::models::router::RouterBuffer;
use std::cmp::Ordering;

/// Least-loaded-with-capacity placement
///
/// # Example
///
/// ```
/// use packet_simulator_core_rs::policy::{LeastLoadedPolicy, RoutingPolicy};
/// use packet_simulator_core_rs::{Packet, RouterBuffer};
///
/// let mut routers = vec![RouterBuffer::new(1, 2), RouterBuffer::new(2, 2)];
/// routers[0].enqueue(Packet::new(1, 100, 0)).unwrap();
///
/// let policy = LeastLoadedPolicy::new();
/// assert_eq!(policy.select_destination(&routers), Ok(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoadedPolicy;

impl LeastLoadedPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl RoutingPolicy for LeastLoadedPolicy {
    fn select_destination(&self, routers: &[RouterBuffer]) -> Result<usize, RoutingError> {
        let mut best: Option<usize> = None;

        for (i, router) in routers.iter().enumerate() {
            if router.is_full() {
                continue;
            }
            match best {
                None => best = Some(i),
                Some(b) if router.cmp_occupancy(&routers[b]) == Ordering::Less => best = Some(i),
                Some(_) => {}
            }
        }

        best.ok_or(RoutingError::AllRoutersFull)
    }

    fn name(&self) -> &'static str {
        "least_loaded"
    }
}
