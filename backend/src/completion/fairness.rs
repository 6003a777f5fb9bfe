//! Bandwidth-limited completion draining
//!
//! The sink accepts at most `bandwidth` packets per tick. When more routers
//! than that have a ready head packet, the extra routers wait in a FIFO and
//! are served first on a later tick. A fixed scan order would keep favouring
//! low-numbered routers under sustained congestion.

use crate::models::packet::Packet;
use crate::models::router::{BufferError, RouterBuffer};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A packet handed to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Router number the packet left from (1-based)
    pub router: usize,
    pub packet: Packet,
}

/// FIFO of routers whose head packet is ready for delivery
///
/// Routers are identified by their position in the router slice. A router is
/// queued at most once at a time; while it waits, nothing else can remove
/// its head, so it is still ready when its turn comes.
///
/// # Example
///
/// ```
/// use packet_simulator_core_rs::completion::CompletionFairnessQueue;
/// use packet_simulator_core_rs::{Packet, RouterBuffer};
///
/// let mut routers = vec![RouterBuffer::new(1, 4), RouterBuffer::new(2, 4)];
/// routers[0].enqueue(Packet::new(1, 50, 0)).unwrap(); // zero transit time
/// routers[1].enqueue(Packet::new(2, 50, 0)).unwrap();
///
/// let mut fairness = CompletionFairnessQueue::new(routers.len());
/// fairness.mark_all_ready(&routers);
///
/// let first = fairness.drain(&mut routers, 1).unwrap();
/// assert_eq!(first[0].router, 1);
/// assert!(fairness.is_queued(1));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CompletionFairnessQueue {
    order: VecDeque<usize>,
    queued: Vec<bool>,
}

impl CompletionFairnessQueue {
    /// Create an empty queue for `num_routers` routers
    pub fn new(num_routers: usize) -> Self {
        Self {
            order: VecDeque::new(),
            queued: vec![false; num_routers],
        }
    }

    /// Queue router `index` if its head is ready and it is not already waiting
    ///
    /// Returns true if the router was newly queued.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the range given to [`Self::new`]
    pub fn mark_if_ready(&mut self, index: usize, router: &RouterBuffer) -> bool {
        if self.queued[index] || !router.head_is_ready() {
            return false;
        }
        self.queued[index] = true;
        self.order.push_back(index);
        true
    }

    /// Run [`Self::mark_if_ready`] over every router in index order
    ///
    /// Returns how many routers were newly queued.
    pub fn mark_all_ready(&mut self, routers: &[RouterBuffer]) -> usize {
        routers
            .iter()
            .enumerate()
            .filter(|(i, router)| self.mark_if_ready(*i, router))
            .count()
    }

    /// Deliver up to `max_count` head packets, earliest-ready router first
    ///
    /// Routers beyond `max_count` stay queued, in order, for the next call.
    ///
    /// # Errors
    ///
    /// `BufferError::EmptyBuffer` if a queued router lost its head packet,
    /// which means some phase dequeued outside this queue.
    pub fn drain(
        &mut self,
        routers: &mut [RouterBuffer],
        max_count: usize,
    ) -> Result<Vec<Completion>, BufferError> {
        let mut completed = Vec::with_capacity(max_count.min(self.order.len()));

        while completed.len() < max_count {
            let Some(index) = self.order.pop_front() else {
                break;
            };
            self.queued[index] = false;

            let router = &mut routers[index];
            debug_assert!(
                router.head_is_ready(),
                "router {} drained while its head is not ready",
                router.id()
            );
            let packet = router.dequeue()?;
            completed.push(Completion {
                router: router.id(),
                packet,
            });
        }

        Ok(completed)
    }

    pub fn is_queued(&self, index: usize) -> bool {
        self.queued.get(index).copied().unwrap_or(false)
    }

    /// Router indices waiting, in service order
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
