//! Dispatcher intake queue
//!
//! Newly generated packets wait here until the placement phase of the same
//! tick routes them. The queue is unbounded and always empty between ticks.

use crate::models::packet::Packet;
use std::collections::VecDeque;

/// Unbounded FIFO of packets awaiting placement
///
/// # Example
/// ```
/// use packet_simulator_core_rs::{Dispatcher, Packet};
///
/// let mut dispatcher = Dispatcher::new();
/// dispatcher.enqueue(Packet::new(1, 100, 1));
/// dispatcher.enqueue(Packet::new(2, 100, 1));
///
/// assert_eq!(dispatcher.dequeue().map(|p| p.id()), Some(1));
/// assert_eq!(dispatcher.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    pending: VecDeque<Packet>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, packet: Packet) {
        self.pending.push_back(packet);
    }

    pub fn dequeue(&mut self) -> Option<Packet> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
