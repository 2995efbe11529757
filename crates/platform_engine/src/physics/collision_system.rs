//! Iterated resolution of one body against every obstacle
//!
//! Broad phase is a cached bounds check per obstacle; narrow phase is the
//! separating-axis test. A pass visits obstacles in registration order and
//! applies each push-out immediately, so later obstacles see the corrected
//! position. Passes repeat up to the configured cap and stop early on a pass
//! without contacts. Deeply nested overlaps may still be left unresolved.

use bitflags::bitflags;

use super::body::Body;
use super::collision::{sat, Contact};
use super::surface::{self, ContactKind, SurfaceEffect};
use crate::config::PhysicsConfig;
use crate::world::Obstacle;

bitflags! {
    /// Contacts observed for one player during one tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContactFlags: u8 {
        /// Landed on an obstacle
        const GROUND = 1 << 0;
        /// Pushed sideways by an obstacle
        const WALL = 1 << 1;
        /// Hit the underside of an obstacle
        const CEILING = 1 << 2;
        /// Stopped by the world floor
        const FLOOR = 1 << 3;
    }
}

impl ContactFlags {
    /// Whether the body is supported this tick
    pub fn is_supported(self) -> bool {
        self.intersects(Self::GROUND | Self::FLOOR)
    }
}

/// One push-out applied during resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedContact {
    /// Obstacle id
    pub obstacle: u32,
    /// Classification of the push-out axis
    pub kind: ContactKind,
    /// Axis and depth that were applied
    pub contact: Contact,
    /// Material effect applied by this contact
    pub effect: SurfaceEffect,
}

/// Result of resolving one body for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Union of contact kinds
    pub flags: ContactFlags,
    /// Every push-out in the order it was applied
    pub contacts: Vec<ResolvedContact>,
    /// Passes that ran
    pub passes: u32,
    /// Set when lava ended resolution early
    pub respawn: bool,
}

/// Resolve `body` against `obstacles`
///
/// Applies contact responses and ground material effects to the body. On
/// lava the body is left untouched and [`Resolution::respawn`] is set; the
/// caller moves it back to spawn.
pub fn resolve_body(body: &mut Body, obstacles: &[Obstacle], config: &PhysicsConfig) -> Resolution {
    let mut resolution = Resolution::default();
    let mut affected: Vec<usize> = Vec::new();

    while resolution.passes < config.resolve_iterations {
        resolution.passes += 1;
        let mut touched = false;

        for (index, obstacle) in obstacles.iter().enumerate() {
            let aabb = body.aabb();
            if !aabb.overlaps(&obstacle.polygon().bounds()) {
                continue;
            }
            let Some(contact) = sat::resolve(&aabb, obstacle.polygon()) else {
                continue;
            };
            touched = true;

            body.position += contact.correction();
            let kind = ContactKind::classify(contact.axis, config.ground_threshold);
            surface::apply_response(kind, &mut body.velocity);
            resolution.flags |= kind.flag();

            let mut effect = SurfaceEffect::None;
            if kind == ContactKind::Ground && !affected.contains(&index) {
                affected.push(index);
                effect = surface::apply_material(obstacle.material(), body, config);
            }

            resolution.contacts.push(ResolvedContact {
                obstacle: obstacle.id(),
                kind,
                contact,
                effect,
            });

            if effect == SurfaceEffect::Respawn {
                resolution.respawn = true;
                return resolution;
            }
        }

        if !touched {
            break;
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::world::{Material, ObstacleDef};
    use approx::assert_relative_eq;

    fn obstacles(defs: &[ObstacleDef]) -> Vec<Obstacle> {
        defs.iter()
            .enumerate()
            .filter_map(|(i, def)| Obstacle::from_def(def, i as u32))
            .collect()
    }

    fn falling_body(x: f64, y: f64) -> Body {
        let mut body = Body::at_rest(Vec2::new(x, y), 40.0, 60.0);
        body.velocity = Vec2::new(0.0, 400.0);
        body
    }

    #[test]
    fn test_no_obstacles_single_pass() {
        let mut body = falling_body(0.0, 0.0);
        let resolution = resolve_body(&mut body, &[], &PhysicsConfig::default());
        assert_eq!(resolution.passes, 1);
        assert!(resolution.flags.is_empty());
        assert!(resolution.contacts.is_empty());
    }

    #[test]
    fn test_landing_sets_ground() {
        let world = obstacles(&[ObstacleDef::rect(0.0, 500.0, 400.0, 20.0, 0.0, Material::Normal)]);
        let mut body = falling_body(100.0, 445.0);

        let resolution = resolve_body(&mut body, &world, &PhysicsConfig::default());
        assert_eq!(resolution.flags, ContactFlags::GROUND);
        assert!(resolution.flags.is_supported());
        assert_relative_eq!(body.position.y, 440.0, epsilon = 1e-9);
        assert_relative_eq!(body.velocity.y, 0.0);
        assert_eq!(resolution.passes, 2);
    }

    #[test]
    fn test_material_applies_once_per_obstacle() {
        let world = obstacles(&[ObstacleDef::rect(0.0, 500.0, 400.0, 20.0, 0.0, Material::Ice)]);
        let mut config = PhysicsConfig::default();
        config.resolve_iterations = 5;

        let mut body = falling_body(100.0, 445.0);
        body.velocity.x = 100.0;
        resolve_body(&mut body, &world, &config);
        assert_relative_eq!(body.velocity.x, 100.0 * config.ice_factor);
    }

    #[test]
    fn test_wall_and_ground_in_one_tick() {
        let world = obstacles(&[
            ObstacleDef::rect(0.0, 500.0, 400.0, 20.0, 0.0, Material::Normal),
            ObstacleDef::rect(200.0, 300.0, 20.0, 200.0, 0.0, Material::Normal),
        ]);
        let mut body = falling_body(165.0, 444.0);
        body.velocity.x = 200.0;

        let resolution = resolve_body(&mut body, &world, &PhysicsConfig::default());
        assert!(resolution.flags.contains(ContactFlags::GROUND | ContactFlags::WALL));
        assert_relative_eq!(body.velocity.x, 0.0);
        assert_relative_eq!(body.position.x, 160.0, epsilon = 1e-9);
        assert_relative_eq!(body.position.y, 440.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lava_stops_resolution() {
        let world = obstacles(&[
            ObstacleDef::rect(0.0, 500.0, 400.0, 20.0, 0.0, Material::Lava),
            ObstacleDef::rect(0.0, 500.0, 400.0, 20.0, 0.0, Material::Bounce),
        ]);
        let mut body = falling_body(100.0, 445.0);

        let resolution = resolve_body(&mut body, &world, &PhysicsConfig::default());
        assert!(resolution.respawn);
        assert_eq!(resolution.contacts.len(), 1);
        assert_eq!(resolution.contacts[0].obstacle, 0);
        assert_eq!(resolution.contacts[0].effect, SurfaceEffect::Respawn);
    }

    #[test]
    fn test_iteration_cap() {
        // Two overlapping slabs keep pushing the body back and forth
        let world = obstacles(&[
            ObstacleDef::rect(0.0, 0.0, 100.0, 1000.0, 0.0, Material::Normal),
            ObstacleDef::rect(110.0, 0.0, 100.0, 1000.0, 0.0, Material::Normal),
        ]);
        let mut config = PhysicsConfig::default();
        config.resolve_iterations = 2;

        let mut body = Body::at_rest(Vec2::new(85.0, 400.0), 40.0, 60.0);
        let resolution = resolve_body(&mut body, &world, &config);
        assert_eq!(resolution.passes, 2);
        assert!(resolution.flags.contains(ContactFlags::WALL));
    }
}
