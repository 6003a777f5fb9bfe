//! Domain models for the packet network simulator

pub mod dispatcher;
pub mod event;
pub mod packet;
pub mod router;
pub mod state;

// Re-exports
pub use dispatcher::Dispatcher;
pub use event::{Event, EventLog};
pub use packet::{Packet, PacketId, PacketIdAllocator};
pub use router::{BufferError, BufferSnapshot, RouterBuffer};
pub use state::SimulationState;
