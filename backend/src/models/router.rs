//! Router buffer model
//!
//! Each intermediate router holds packets in a bounded FIFO buffer. Only the
//! head packet is being serviced at any tick: its transit time counts down
//! while the packets behind it just accumulate network time.
//!
//! # Critical Invariants
//!
//! 1. **Bounded**: `0 <= len <= capacity` after every public operation
//! 2. **FIFO**: `dequeue` always returns the oldest packet still present
//! 3. **No silent drops**: enqueueing into a full buffer is an error, never a discard

use crate::models::packet::Packet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Errors raised by router buffer operations
///
/// Both variants mean a caller broke the phase ordering of a tick; the
/// placement phase consults the routing policy before enqueueing and the
/// completion phase only dequeues buffers whose head is ready.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Router {router} is full (capacity {capacity})")]
    CapacityExceeded { router: usize, capacity: usize },

    #[error("Router {router} has no packets")]
    EmptyBuffer { router: usize },
}

/// Bounded FIFO buffer of one intermediate router
///
/// # Example
/// ```
/// use packet_simulator_core_rs::{BufferError, Packet, RouterBuffer};
///
/// let mut router = RouterBuffer::new(1, 2);
/// router.enqueue(Packet::new(1, 100, 0)).unwrap();
/// router.enqueue(Packet::new(2, 100, 0)).unwrap();
///
/// let overflow = router.enqueue(Packet::new(3, 100, 0));
/// assert_eq!(overflow, Err(BufferError::CapacityExceeded { router: 1, capacity: 2 }));
///
/// assert_eq!(router.dequeue().unwrap().id(), 1);
/// assert_eq!(router.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RouterBuffer {
    /// Router number as shown to users (1-based)
    id: usize,
    capacity: usize,
    packets: VecDeque<Packet>,
}

impl RouterBuffer {
    /// Create an empty buffer
    ///
    /// # Panics
    /// Panics if capacity is zero
    pub fn new(id: usize, capacity: usize) -> Self {
        assert!(capacity > 0, "router capacity must be positive");
        Self {
            id,
            capacity,
            packets: VecDeque::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.packets.len() >= self.capacity
    }

    /// Free slots left
    pub fn spare_capacity(&self) -> usize {
        self.capacity - self.packets.len()
    }

    /// Append a packet at the tail
    pub fn enqueue(&mut self, packet: Packet) -> Result<(), BufferError> {
        if self.is_full() {
            return Err(BufferError::CapacityExceeded {
                router: self.id,
                capacity: self.capacity,
            });
        }
        self.packets.push_back(packet);
        Ok(())
    }

    /// Remove and return the head packet
    pub fn dequeue(&mut self) -> Result<Packet, BufferError> {
        self.packets
            .pop_front()
            .ok_or(BufferError::EmptyBuffer { router: self.id })
    }

    pub fn peek_head(&self) -> Option<&Packet> {
        self.packets.front()
    }

    /// True if the head packet has no transit time left
    pub fn head_is_ready(&self) -> bool {
        self.peek_head().is_some_and(Packet::is_ready)
    }

    /// Serve one tick of transit to the head packet only
    ///
    /// The countdown is skipped while the head has not yet spent a tick in
    /// the network. Returns true if the head's transit time decreased.
    pub fn decrement_head_transit_time(&mut self) -> bool {
        self.packets.front_mut().is_some_and(Packet::count_down)
    }

    /// Every buffered packet spends one more tick in the network
    pub fn increment_all_time_in_network(&mut self) {
        for packet in self.packets.iter_mut() {
            packet.age();
        }
    }

    /// Compare by occupancy (fewer packets orders first)
    pub fn cmp_occupancy(&self, other: &RouterBuffer) -> Ordering {
        self.len().cmp(&other.len())
    }

    /// Packets from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.packets.iter()
    }

    /// Owned copy of the buffer contents for reporting
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            router: self.id,
            capacity: self.capacity,
            packets: self.packets.iter().cloned().collect(),
        }
    }
}

impl fmt::Display for RouterBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_packet_list(f, self.packets.iter())
    }
}

/// Point-in-time view of one router's buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSnapshot {
    /// Router number (1-based)
    pub router: usize,
    pub capacity: usize,
    /// Packets from head to tail
    pub packets: Vec<Packet>,
}

impl BufferSnapshot {
    pub fn occupancy(&self) -> usize {
        self.packets.len()
    }
}

impl fmt::Display for BufferSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_packet_list(f, self.packets.iter())
    }
}

fn write_packet_list<'a>(
    f: &mut fmt::Formatter<'_>,
    packets: impl Iterator<Item = &'a Packet>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, packet) in packets.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", packet)?;
    }
    f.write_str("}")
}
