//! In-process transport over crossbeam channels
//!
//! Clients attach through a [`Connector`] and talk to the server with a
//! [`ClientHandle`]. Every client event travels over one shared unbounded
//! channel; each connection gets its own bounded outbox. A client that lets
//! its outbox fill up is dropped. The transport closes once every connector
//! and client handle has been dropped.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

use super::{ClientEvent, ConnectionId, ServerMessage, Transport, TransportError};
use crate::foundation::collections::key_to_u64;
use crate::foundation::logging::{debug, info, warn};
use crate::player::{InputIntent, PlayerId};
use crate::simulation::{PlayerSnapshot, Simulation, StateSnapshot};

/// Server messages a client may leave unread before it is dropped
pub const DEFAULT_OUTBOX_CAPACITY: usize = 100;

struct Connection {
    player: PlayerId,
    outbox: Sender<ServerMessage>,
}

/// Server side of the channel transport
pub struct ChannelTransport {
    events: Receiver<ClientEvent>,
    connections: BTreeMap<ConnectionId, Connection>,
    dropped: Vec<ConnectionId>,
    closed: bool,
}

impl ChannelTransport {
    /// Create a transport and the connector clients attach through
    pub fn new() -> (Self, Connector) {
        Self::with_outbox_capacity(DEFAULT_OUTBOX_CAPACITY)
    }

    /// Like [`ChannelTransport::new`] with a custom per-client outbox size
    pub fn with_outbox_capacity(capacity: usize) -> (Self, Connector) {
        let (sender, events) = unbounded();
        let transport = Self {
            events,
            connections: BTreeMap::new(),
            dropped: Vec::new(),
            closed: false,
        };
        let connector = Connector {
            events: sender,
            next_conn: Arc::new(AtomicU64::new(1)),
            outbox_capacity: capacity.max(1),
        };
        (transport, connector)
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn handle_event(&mut self, event: ClientEvent, sim: &mut Simulation) {
        match event {
            ClientEvent::Connected { conn, outbox } => self.accept(conn, outbox, sim),
            ClientEvent::Input { conn, intent } => self.apply_input(conn, intent, sim),
            ClientEvent::RawInput { conn, payload } => {
                self.apply_input(conn, InputIntent::parse_lenient(&payload), sim);
            }
            ClientEvent::Disconnected { conn } => self.drop_connection(conn, sim),
        }
    }

    fn accept(&mut self, conn: ConnectionId, outbox: Sender<ServerMessage>, sim: &mut Simulation) {
        let player = sim.connect();
        let welcome = ServerMessage::Welcome {
            player: key_to_u64(player),
            world: sim.world_snapshot(),
        };
        if outbox.try_send(welcome).is_err() {
            warn!("Connection {conn} cannot take its welcome");
            // The player existed only for this connection
            let _ = sim.disconnect(player);
            return;
        }

        if let Some(state) = sim.player(player) {
            let joined = ServerMessage::PlayerJoined {
                player: PlayerSnapshot::capture(player, state),
            };
            self.send_to_all(&joined);
        }

        debug!("Connection {conn} bound to player {player:?}");
        self.connections.insert(conn, Connection { player, outbox });
    }

    fn apply_input(&mut self, conn: ConnectionId, intent: InputIntent, sim: &mut Simulation) {
        let Some(connection) = self.connections.get(&conn) else {
            debug!("Input from unknown connection {conn} ignored");
            return;
        };
        // Unknown players are logged by the simulation
        let _ = sim.set_input(connection.player, intent);
    }

    fn drop_connection(&mut self, conn: ConnectionId, sim: &mut Simulation) {
        let Some(connection) = self.connections.remove(&conn) else {
            return;
        };
        if sim.disconnect(connection.player).is_ok() {
            self.send_to_all(&ServerMessage::PlayerLeft {
                player: key_to_u64(connection.player),
            });
        }
    }

    fn send_to_all(&mut self, message: &ServerMessage) {
        for (conn, connection) in &self.connections {
            if connection.outbox.try_send(message.clone()).is_err() && !self.dropped.contains(conn) {
                warn!("Connection {conn} is gone or not reading, dropping it");
                self.dropped.push(*conn);
            }
        }
    }
}

impl Transport for ChannelTransport {
    fn pump(&mut self, sim: &mut Simulation) -> Result<(), TransportError> {
        for conn in std::mem::take(&mut self.dropped) {
            self.drop_connection(conn, sim);
        }

        loop {
            match self.events.try_recv() {
                Ok(event) => self.handle_event(event, sim),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        info!("All clients detached, channel transport closed");
                        self.closed = true;
                    }
                    break;
                }
            }
        }
        Ok(())
    }

    fn broadcast(&mut self, snapshot: &StateSnapshot) -> Result<(), TransportError> {
        self.send_to_all(&ServerMessage::State(snapshot.clone()));
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Cloneable factory for client handles
#[derive(Clone)]
pub struct Connector {
    events: Sender<ClientEvent>,
    next_conn: Arc<AtomicU64>,
    outbox_capacity: usize,
}

impl Connector {
    /// Attach a new client; the server picks it up on its next pump
    pub fn connect(&self) -> Result<ClientHandle, TransportError> {
        let conn = self.next_conn.fetch_add(1, Ordering::Relaxed);
        let (outbox, inbox) = bounded(self.outbox_capacity);
        self.events
            .send(ClientEvent::Connected { conn, outbox })
            .map_err(|_| TransportError::Closed)?;
        Ok(ClientHandle {
            conn,
            events: self.events.clone(),
            inbox,
            attached: true,
        })
    }
}

/// Client side of one connection
///
/// Dropping the handle disconnects it.
pub struct ClientHandle {
    conn: ConnectionId,
    events: Sender<ClientEvent>,
    inbox: Receiver<ServerMessage>,
    attached: bool,
}

impl ClientHandle {
    /// Connection number
    pub fn conn(&self) -> ConnectionId {
        self.conn
    }

    /// Report the currently held buttons
    pub fn send_input(&self, intent: InputIntent) -> Result<(), TransportError> {
        self.send(ClientEvent::Input {
            conn: self.conn,
            intent,
        })
    }

    /// Report input as undecoded RON text
    pub fn send_raw_input(&self, payload: impl Into<String>) -> Result<(), TransportError> {
        self.send(ClientEvent::RawInput {
            conn: self.conn,
            payload: payload.into(),
        })
    }

    /// Next server message, if one is queued
    pub fn try_recv(&self) -> Option<ServerMessage> {
        self.inbox.try_recv().ok()
    }

    /// Wait up to `timeout` for the next server message
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ServerMessage>, TransportError> {
        match self.inbox.recv_timeout(timeout) {
            Ok(message) => Ok(Some(message)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(TransportError::Closed),
        }
    }

    /// Every queued server message
    pub fn drain(&self) -> Vec<ServerMessage> {
        self.inbox.try_iter().collect()
    }

    /// Detach from the server
    pub fn disconnect(mut self) -> Result<(), TransportError> {
        self.attached = false;
        self.send(ClientEvent::Disconnected { conn: self.conn })
    }

    fn send(&self, event: ClientEvent) -> Result<(), TransportError> {
        self.events.send(event).map_err(|_| TransportError::Closed)
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        if self.attached {
            let _ = self.events.send(ClientEvent::Disconnected { conn: self.conn });
        }
    }
}
