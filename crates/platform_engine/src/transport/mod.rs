//! Boundary between the simulation and client delivery
//!
//! The scheduler only talks to a [`Transport`]: once per tick it lets the
//! transport apply queued client events to the simulation, then hands it the
//! finished state snapshot. [`ChannelTransport`] is an in-process
//! implementation over crossbeam channels.

mod channel;

pub use channel::{ChannelTransport, ClientHandle, Connector};

use serde::{Deserialize, Serialize};

use crate::player::InputIntent;
use crate::simulation::{PlayerSnapshot, Simulation, StateSnapshot};
use crate::world::WorldSnapshot;

/// Transport-assigned connection number
pub type ConnectionId = u64;

/// Message from a client to the server
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A client attached; server messages go to `outbox`
    Connected {
        /// Connection number
        conn: ConnectionId,
        /// Channel the server writes to
        outbox: crossbeam::channel::Sender<ServerMessage>,
    },
    /// Decoded input intent
    Input {
        /// Connection number
        conn: ConnectionId,
        /// Held buttons
        intent: InputIntent,
    },
    /// Undecoded input payload (RON text)
    RawInput {
        /// Connection number
        conn: ConnectionId,
        /// Payload as received
        payload: String,
    },
    /// The client went away
    Disconnected {
        /// Connection number
        conn: ConnectionId,
    },
}

/// Message from the server to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// First message on every connection
    Welcome {
        /// Numeric id of the client's own player
        player: u64,
        /// Static world geometry
        world: WorldSnapshot,
    },
    /// Another player connected
    PlayerJoined {
        /// The new player's state
        player: PlayerSnapshot,
    },
    /// Another player disconnected
    PlayerLeft {
        /// Numeric id of the departed player
        player: u64,
    },
    /// State after a tick
    State(StateSnapshot),
}

/// Transport errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No further client events can arrive
    #[error("Transport closed")]
    Closed,
}

/// Client delivery as seen by the scheduler
pub trait Transport {
    /// Apply every queued client event to `sim`
    fn pump(&mut self, sim: &mut Simulation) -> Result<(), TransportError>;

    /// Deliver the state after a tick to every client
    fn broadcast(&mut self, snapshot: &StateSnapshot) -> Result<(), TransportError>;

    /// Whether the transport can no longer receive client events
    fn is_closed(&self) -> bool;
}
