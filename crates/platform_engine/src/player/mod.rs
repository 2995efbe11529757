//! Connected players
//!
//! A [`Player`] is created at the world spawn on connect, mutated once per
//! tick by the simulation and dropped on disconnect.

pub mod input;
pub mod movement_state;

pub use input::InputIntent;
pub use movement_state::{MovementController, MovementState};

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;
use crate::physics::Body;

slotmap::new_key_type! {
    /// Stable handle of a connected player
    pub struct PlayerId;
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Toward negative x
    Left,
    /// Toward positive x
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, 1 for right
    pub fn sign(self) -> i8 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }

    /// Facing implied by a horizontal velocity; `None` when standing still
    pub fn from_velocity(vx: f64) -> Option<Self> {
        if vx < 0.0 {
            Some(Facing::Left)
        } else if vx > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// Kinematic and identity state of one player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Display name
    pub name: String,
    /// CSS color string
    pub color: String,
    /// Position, velocity and box size
    pub body: Body,
    /// Direction the sprite faces
    pub facing: Facing,
    /// Supported during the last tick
    pub grounded: bool,
    /// Movement state and grace timers
    pub movement: MovementController,
    /// Latest input, overwritten on every receipt
    pub input: InputIntent,
}

impl Player {
    /// New airborne player at `spawn` with no input
    pub fn new(name: String, color: String, spawn: Vec2, width: f64, height: f64) -> Self {
        Self {
            name,
            color,
            body: Body::at_rest(spawn, width, height),
            facing: Facing::default(),
            grounded: false,
            movement: MovementController::default(),
            input: InputIntent::default(),
        }
    }

    /// Send the player back to `spawn` at rest with cleared timers
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.position = spawn;
        self.body.velocity = Vec2::zeros();
        self.grounded = false;
        self.movement.reset();
    }
}
