//! Event logging for simulation replay and auditing.
//!
//! Every packet-level state change is recorded with the tick it happened in:
//! - **PacketGenerated**: arrival process created a packet at the dispatcher
//! - **PacketRouted**: placement put the packet into a router buffer
//! - **PacketDropped**: every router was full at placement time
//! - **PacketDelivered**: the sink drained the packet from its router
//!
//! Together the events give each packet's full history, so a run can be
//! audited after the fact without re-executing it.
//!
//! # Example
//!
//! ```rust
//! use packet_simulator_core_rs::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::PacketGenerated { tick: 1, packet_id: 1, size: 240 });
//! log.log(Event::PacketRouted { tick: 1, packet_id: 1, router: 2 });
//!
//! assert_eq!(log.events_for_packet(1).len(), 2);
//! assert_eq!(log.events_at_tick(1)[1].event_type(), "PacketRouted");
//! ```

use crate::models::packet::PacketId;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a packet state change.
///
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    PacketGenerated {
        tick: usize,
        packet_id: PacketId,
        size: usize,
    },

    /// Packet placed into router number `router` (1-based)
    PacketRouted {
        tick: usize,
        packet_id: PacketId,
        router: usize,
    },

    /// Packet discarded at placement because no router had room
    PacketDropped { tick: usize, packet_id: PacketId },

    /// Packet handed to the sink after `time_in_network` ticks in a router
    PacketDelivered {
        tick: usize,
        packet_id: PacketId,
        router: usize,
        time_in_network: usize,
    },
}

impl Event {
    pub fn tick(&self) -> usize {
        match self {
            Event::PacketGenerated { tick, .. } => *tick,
            Event::PacketRouted { tick, .. } => *tick,
            Event::PacketDropped { tick, .. } => *tick,
            Event::PacketDelivered { tick, .. } => *tick,
        }
    }

    pub fn packet_id(&self) -> PacketId {
        match self {
            Event::PacketGenerated { packet_id, .. } => *packet_id,
            Event::PacketRouted { packet_id, .. } => *packet_id,
            Event::PacketDropped { packet_id, .. } => *packet_id,
            Event::PacketDelivered { packet_id, .. } => *packet_id,
        }
    }

    /// Short name of the event kind
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PacketGenerated { .. } => "PacketGenerated",
            Event::PacketRouted { .. } => "PacketRouted",
            Event::PacketDropped { .. } => "PacketDropped",
            Event::PacketDelivered { .. } => "PacketDelivered",
        }
    }

    /// Router involved, if any
    pub fn router(&self) -> Option<usize> {
        match self {
            Event::PacketRouted { router, .. } => Some(*router),
            Event::PacketDelivered { router, .. } => Some(*router),
            _ => None,
        }
    }
}

/// Append-only log of simulation events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// History of one packet, oldest first
    pub fn events_for_packet(&self, packet_id: PacketId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.packet_id() == packet_id)
            .collect()
    }

    pub fn events_for_router(&self, router: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.router() == Some(router))
            .collect()
    }
}
