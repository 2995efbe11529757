//! # Platform Engine
//!
//! Authoritative, tick-based 2D platformer physics for multiplayer servers.
//!
//! ## Features
//!
//! - **SAT Collision**: Axis-aligned player boxes against rotated rectangles
//!   and convex curve hulls
//! - **Movement Feel**: Acceleration, friction, coyote time and jump buffering
//! - **Surface Materials**: Ice, lava, bounce and sticky ground effects
//! - **Deterministic Ticks**: Explicit simulation state, seeded identities
//! - **Transport Seam**: Pluggable client delivery with a channel adapter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platform_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let simulation = Simulation::new(World::default(), config.clone());
//!     let mut scheduler = TickScheduler::new(simulation, config.tick)?;
//!
//!     let (mut transport, connector) = ChannelTransport::new();
//!     let client = connector.connect()?;
//!     client.send_input(InputIntent { right: true, ..InputIntent::default() })?;
//!
//!     scheduler.run(&mut transport)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod player;
pub mod scheduler;
pub mod simulation;
pub mod transport;
pub mod world;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig, PhysicsConfig, SessionConfig, TickConfig},
        foundation::math::Vec2,
        physics::ContactFlags,
        player::{InputIntent, PlayerId},
        scheduler::{RunSummary, SchedulerError, StopHandle, StopReason, TickScheduler},
        simulation::{PlayerSnapshot, SessionError, Simulation, StateSnapshot, StepReport},
        transport::{ChannelTransport, ClientHandle, Connector, ServerMessage, Transport, TransportError},
        world::{Material, ObstacleDef, Shape, World, WorldDef, WorldSnapshot},
    };
}
