//! Per-tick state broadcast to clients

use serde::{Deserialize, Serialize};

use crate::foundation::collections::key_to_u64;
use crate::player::{Player, PlayerId};

/// One player as seen by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Numeric player id
    pub id: u64,
    /// Display name
    pub name: String,
    /// CSS color string
    pub color: String,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal velocity
    pub vx: f64,
    /// Vertical velocity (positive is down)
    pub vy: f64,
    /// -1 facing left, 1 facing right
    pub facing: i8,
    /// Supported during the last tick
    pub grounded: bool,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl PlayerSnapshot {
    /// Capture `player`
    pub fn capture(id: PlayerId, player: &Player) -> Self {
        Self {
            id: key_to_u64(id),
            name: player.name.clone(),
            color: player.color.clone(),
            x: player.body.position.x,
            y: player.body.position.y,
            vx: player.body.velocity.x,
            vy: player.body.velocity.y,
            facing: player.facing.sign(),
            grounded: player.grounded,
            width: player.body.width,
            height: player.body.height,
        }
    }
}

/// Every player after one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Ticks completed so far
    pub tick: u64,
    /// Players in simulation order
    pub players: Vec<PlayerSnapshot>,
}

impl StateSnapshot {
    /// Find a player by handle
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        let raw = key_to_u64(id);
        self.players.iter().find(|p| p.id == raw)
    }
}
