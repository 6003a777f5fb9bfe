//! Packet model
//!
//! A packet is created at the dispatcher with a size and an arrival tick.
//! Its transit time is derived from its size and only counts down while it
//! sits at the head of a router buffer. Network time accumulates every tick
//! the packet occupies any router.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes of packet size per tick of transit time
pub const BYTES_PER_TRANSIT_TICK: usize = 100;

/// Unique packet identifier, assigned in creation order within a run
pub type PacketId = u64;

/// Hands out packet identifiers for one simulation run
///
/// Each engine owns its own allocator, so independent runs (and tests
/// running in parallel) never share a counter.
///
/// # Example
/// ```
/// use packet_simulator_core_rs::PacketIdAllocator;
///
/// let mut ids = PacketIdAllocator::new();
/// assert_eq!(ids.next_id(), 1);
/// assert_eq!(ids.next_id(), 2);
/// assert_eq!(ids.allocated(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacketIdAllocator {
    allocated: u64,
}

impl PacketIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier (first is 1)
    pub fn next_id(&mut self) -> PacketId {
        self.allocated += 1;
        self.allocated
    }

    /// Number of identifiers handed out so far
    pub fn allocated(&self) -> u64 {
        self.allocated
    }
}

/// A unit of traffic moving through the network
///
/// # Example
/// ```
/// use packet_simulator_core_rs::Packet;
///
/// let packet = Packet::new(7, 250, 3);
/// assert_eq!(packet.remaining_transit_time(), 2); // 250 / 100
/// assert_eq!(packet.time_in_network(), 0);
/// assert_eq!(packet.to_string(), "[7, 3, 2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    id: PacketId,

    /// Size in bytes
    size: usize,

    /// Tick the packet was generated
    arrival_tick: usize,

    /// Ticks of head-of-line service still needed before delivery
    remaining_transit_time: usize,

    /// Ticks spent inside router buffers so far
    time_in_network: usize,
}

impl Packet {
    /// Create a packet; transit time is `size / 100` rounded down
    pub fn new(id: PacketId, size: usize, arrival_tick: usize) -> Self {
        Self {
            id,
            size,
            arrival_tick,
            remaining_transit_time: size / BYTES_PER_TRANSIT_TICK,
            time_in_network: 0,
        }
    }

    pub fn id(&self) -> PacketId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn arrival_tick(&self) -> usize {
        self.arrival_tick
    }

    pub fn remaining_transit_time(&self) -> usize {
        self.remaining_transit_time
    }

    pub fn time_in_network(&self) -> usize {
        self.time_in_network
    }

    /// True once no transit time remains
    pub fn is_ready(&self) -> bool {
        self.remaining_transit_time == 0
    }

    /// Count one more tick spent in a router
    pub(crate) fn age(&mut self) {
        self.time_in_network += 1;
    }

    /// Serve one tick of transit, gated on the packet having spent at
    /// least one full tick in the network
    ///
    /// Returns true if the transit time actually decreased.
    pub(crate) fn count_down(&mut self) -> bool {
        if self.time_in_network > 0 && self.remaining_transit_time > 0 {
            self.remaining_transit_time -= 1;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.id, self.arrival_tick, self.remaining_transit_time
        )
    }
}
