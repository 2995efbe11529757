//! Contact classification and material effects
//!
//! Every resolved contact is classified by the direction of its push-out axis
//! and gets a velocity response. Ground contacts additionally apply the
//! obstacle's material, at most once per obstacle per tick (enforced by the
//! collision system).

use super::body::Body;
use super::collision_system::ContactFlags;
use crate::config::PhysicsConfig;
use crate::foundation::math::{down, up, Vec2};
use crate::world::Material;

/// Which side of the obstacle the player touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    /// Standing on top
    Ground,
    /// Pushed sideways
    Wall,
    /// Hit from below
    Ceiling,
}

impl ContactKind {
    /// Classify a push-out axis; `threshold` is the minimum dot product with
    /// "up" (or "down") for a floor (or ceiling)
    pub fn classify(axis: Vec2, threshold: f64) -> Self {
        if axis.dot(&up()) > threshold {
            ContactKind::Ground
        } else if axis.dot(&down()) > threshold {
            ContactKind::Ceiling
        } else {
            ContactKind::Wall
        }
    }

    /// Flag recorded in step reports
    pub fn flag(self) -> ContactFlags {
        match self {
            ContactKind::Ground => ContactFlags::GROUND,
            ContactKind::Wall => ContactFlags::WALL,
            ContactKind::Ceiling => ContactFlags::CEILING,
        }
    }
}

/// Stop motion into the surface
pub fn apply_response(kind: ContactKind, velocity: &mut Vec2) {
    match kind {
        ContactKind::Ground => velocity.y = velocity.y.min(0.0),
        ContactKind::Wall => velocity.x = 0.0,
        ContactKind::Ceiling => velocity.y = velocity.y.max(0.0),
    }
}

/// Outcome of a material effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEffect {
    /// Nothing changed
    None,
    /// Horizontal velocity was scaled
    Scaled,
    /// Vertical velocity was replaced by the bounce launch
    Launched,
    /// The player must be sent back to spawn; resolution stops
    Respawn,
}

/// Apply `material` to a body standing on it
///
/// Lava only reports [`SurfaceEffect::Respawn`]; the caller owns the spawn
/// point and the movement timers it resets.
pub fn apply_material(material: Material, body: &mut Body, config: &PhysicsConfig) -> SurfaceEffect {
    match material {
        Material::Normal => SurfaceEffect::None,
        Material::Ice => {
            body.velocity.x *= config.ice_factor;
            SurfaceEffect::Scaled
        }
        Material::Sticky => {
            body.velocity.x *= config.sticky_factor;
            SurfaceEffect::Scaled
        }
        Material::Bounce => {
            body.velocity.y = -config.bounce_velocity;
            SurfaceEffect::Launched
        }
        Material::Lava => SurfaceEffect::Respawn,
    }
}
