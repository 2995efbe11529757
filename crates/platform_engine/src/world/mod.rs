//! Static world: bounds, spawn point and ordered obstacles
//!
//! [`WorldDef`] is the authored form, loadable from `.toml` or `.ron` through
//! [`Config`]. [`World::from_def`] validates it into the runtime form. Bad
//! geometry never fails the load: the offending obstacle is skipped and a
//! warning is logged.

pub mod material;
pub mod obstacle;

pub use material::Material;
pub use obstacle::{Obstacle, ObstacleDef, ObstacleSnapshot, Shape};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::logging::{info, warn};
use crate::foundation::math::{utils, Vec2};

/// World extent; the playable area is `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent (y grows downward)
    pub height: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 1200.0,
        }
    }
}

impl WorldBounds {
    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Authored world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDef {
    /// World extent
    pub bounds: WorldBounds,
    /// Where players appear on connect and after touching lava
    pub spawn: Vec2,
    /// Obstacles; earlier entries win multi-overlap ties
    pub obstacles: Vec<ObstacleDef>,
}

impl Default for WorldDef {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::default(),
            spawn: Vec2::new(100.0, 100.0),
            obstacles: vec![
                ObstacleDef::rect(100.0, 500.0, 200.0, 20.0, 0.0, Material::Normal),
                ObstacleDef::rect(400.0, 400.0, 200.0, 20.0, 15.0, Material::Ice),
                ObstacleDef::rect(700.0, 300.0, 200.0, 20.0, -20.0, Material::Lava),
            ],
        }
    }
}

impl Config for WorldDef {}

/// Runtime world, read-only during simulation
#[derive(Debug, Clone)]
pub struct World {
    bounds: WorldBounds,
    spawn: Vec2,
    obstacles: Vec<Obstacle>,
}

impl World {
    /// Validate a definition
    ///
    /// Invalid bounds fall back to the defaults and the spawn point is
    /// clamped into the bounds.
    pub fn from_def(def: &WorldDef) -> Self {
        let bounds = if def.bounds.is_valid() {
            def.bounds
        } else {
            warn!(
                "World bounds {}x{} are invalid, using defaults",
                def.bounds.width, def.bounds.height
            );
            WorldBounds::default()
        };

        let spawn = if utils::is_finite(def.spawn) {
            Vec2::new(
                def.spawn.x.clamp(0.0, bounds.width),
                def.spawn.y.clamp(0.0, bounds.height),
            )
        } else {
            warn!("Spawn point is not finite, using the world origin");
            Vec2::zeros()
        };

        let mut obstacles = Vec::with_capacity(def.obstacles.len());
        for (index, obstacle_def) in def.obstacles.iter().enumerate() {
            let fallback_id = u32::try_from(index).unwrap_or(u32::MAX);
            match Obstacle::from_def(obstacle_def, fallback_id) {
                Some(obstacle) => obstacles.push(obstacle),
                None => warn!(
                    "Skipping malformed {} obstacle #{} ({})",
                    obstacle_def.shape.kind(),
                    index,
                    obstacle_def.material
                ),
            }
        }

        info!(
            "World loaded: {}x{}, spawn ({}, {}), {} of {} obstacles",
            bounds.width,
            bounds.height,
            spawn.x,
            spawn.y,
            obstacles.len(),
            def.obstacles.len()
        );

        Self {
            bounds,
            spawn,
            obstacles,
        }
    }

    /// Obstacles in registration order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Spawn point, the top-left corner of a spawned player
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Spawn point moved so a `width` x `height` box fits inside the world
    pub fn spawn_for(&self, width: f64, height: f64) -> Vec2 {
        Vec2::new(
            self.spawn.x.min(self.bounds.width - width).max(0.0),
            self.spawn.y.min(self.bounds.height - height).max(0.0),
        )
    }

    /// World extent
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Serializable view, sent once per connection
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            width: self.bounds.width,
            height: self.bounds.height,
            spawn: self.spawn,
            obstacles: self.obstacles.iter().map(Obstacle::snapshot).collect(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::from_def(&WorldDef::default())
    }
}

/// World geometry as sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
    /// Spawn point
    pub spawn: Vec2,
    /// Obstacles in registration order
    pub obstacles: Vec<ObstacleSnapshot>,
}
