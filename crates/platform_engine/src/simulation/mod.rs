//! Authoritative simulation state and the per-tick pipeline
//!
//! [`Simulation`] owns the world, every connected player, the tunables and
//! the RNG used for names and colors. Nothing here is global: the scheduler
//! owns one value and passes it to the transport each tick.
//!
//! Per player and tick, in order:
//! 1. Grace timers update from the jump input
//! 2. A jump fires when both timers allow it
//! 3. Integration
//! 4. Iterated collision resolution with surface effects
//! 5. World-bound clamping, so no push-out leaves the world
//! 6. Grounded flag and movement state from this tick's contacts only

mod snapshot;


pub use snapshot::{PlayerSnapshot, StateSnapshot};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;

use crate::config::{EngineConfig, PhysicsConfig};
use crate::foundation::logging::{debug, info, warn};
use crate::physics::{integrator, resolve_body, ContactFlags};
use crate::player::{Facing, InputIntent, Player, PlayerId};
use crate::world::{World, WorldSnapshot};

/// Color used when the configured palette is empty
const FALLBACK_COLOR: &str = "#ffffff";

/// Session-level errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The id does not name a connected player
    #[error("Unknown player: {0:?}")]
    UnknownPlayer(PlayerId),
}

/// What happened to one player during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerReport {
    /// Player handle
    pub id: PlayerId,
    /// Contacts observed this tick
    pub contacts: ContactFlags,
    /// A jump fired this tick
    pub jumped: bool,
    /// Lava sent the player back to spawn
    pub respawned: bool,
}

/// Result of [`Simulation::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Tick number after the step
    pub tick: u64,
    /// Seconds simulated
    pub dt: f64,
    /// One entry per player, in simulation order
    pub players: Vec<PlayerReport>,
}

impl StepReport {
    /// Report for one player
    pub fn player(&self, id: PlayerId) -> Option<&PlayerReport> {
        self.players.iter().find(|report| report.id == id)
    }
}

/// Complete simulation state
pub struct Simulation {
    world: World,
    players: SlotMap<PlayerId, Player>,
    config: EngineConfig,
    tick: u64,
    rng: StdRng,
}

impl Simulation {
    /// Create an empty session over `world`
    pub fn new(world: World, config: EngineConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.session.seed);
        Self {
            world,
            players: SlotMap::with_key(),
            config,
            tick: 0,
            rng,
        }
    }

    /// Add a player at the world spawn
    pub fn connect(&mut self) -> PlayerId {
        let session = &self.config.session;
        let name = format!("{}{:03}", session.name_prefix, self.rng.gen_range(0..1000));
        let color = if session.palette.is_empty() {
            FALLBACK_COLOR.to_string()
        } else {
            session.palette[self.rng.gen_range(0..session.palette.len())].clone()
        };

        let physics = &self.config.physics;
        let player = Player::new(
            name,
            color,
            self.world.spawn_for(physics.player_width, physics.player_height),
            physics.player_width,
            physics.player_height,
        );
        info!("{} connected ({})", player.name, player.color);
        self.players.insert(player)
    }

    /// Replace a player's input intent
    pub fn set_input(&mut self, id: PlayerId, intent: InputIntent) -> Result<(), SessionError> {
        match self.players.get_mut(id) {
            Some(player) => {
                player.input = intent;
                Ok(())
            }
            None => {
                debug!("Input for unknown player {id:?} ignored");
                Err(SessionError::UnknownPlayer(id))
            }
        }
    }

    /// Remove a player
    pub fn disconnect(&mut self, id: PlayerId) -> Result<Player, SessionError> {
        let player = self.players.remove(id).ok_or(SessionError::UnknownPlayer(id))?;
        info!("{} disconnected", player.name);
        Ok(player)
    }

    /// Advance every player by `dt` seconds
    ///
    /// A non-finite or negative `dt` is treated as zero.
    pub fn step(&mut self, dt: f64) -> StepReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("Invalid tick delta {dt}, simulating zero time");
            0.0
        };

        let physics = &self.config.physics;
        let world = &self.world;
        let players = self
            .players
            .iter_mut()
            .map(|(id, player)| step_player(id, player, world, physics, dt))
            .collect();

        self.tick += 1;
        StepReport {
            tick: self.tick,
            dt,
            players,
        }
    }

    /// World geometry for a newly connected client
    pub fn world_snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    /// State of every player after the last tick
    pub fn state_snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            tick: self.tick,
            players: self
                .players
                .iter()
                .map(|(id, player)| PlayerSnapshot::capture(id, player))
                .collect(),
        }
    }

    /// Look up a player
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Every player in simulation order
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter()
    }

    /// Number of connected players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Static world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

fn step_player(id: PlayerId, player: &mut Player, world: &World, physics: &PhysicsConfig, dt: f64) -> PlayerReport {
    player.movement.update_timers(player.input.jump, dt, physics);
    let jumped = player.movement.try_jump();
    if jumped {
        player.body.velocity.y = -physics.jump_velocity;
    }

    integrator::integrate(&mut player.body, player.input.direction(), physics, dt);
    if let Some(facing) = Facing::from_velocity(player.body.velocity.x) {
        player.facing = facing;
    }

    let resolution = resolve_body(&mut player.body, world.obstacles(), physics);
    if resolution.respawn {
        debug!("{} touched lava, respawning", player.name);
        player.respawn(world.spawn_for(player.body.width, player.body.height));
        return PlayerReport {
            id,
            contacts: resolution.flags,
            jumped,
            respawned: true,
        };
    }

    let contacts = resolution.flags | integrator::clamp_to_bounds(&mut player.body, &world.bounds());

    player.grounded = contacts.is_supported();
    player.movement.finish_tick(player.grounded, dt, physics);

    PlayerReport {
        id,
        contacts,
        jumped,
        respawned: false,
    }
}
