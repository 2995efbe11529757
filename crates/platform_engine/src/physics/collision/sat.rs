//! Separating-axis overlap test between the player box and a convex polygon
//!
//! Candidate axes are the world X and Y axes (the box's own face normals)
//! followed by every edge normal of the polygon. The first axis whose
//! projections do not overlap proves the shapes disjoint. Otherwise the axis
//! with the smallest penetration gives the minimum translation vector.
//!
//! Each axis is oriented from the obstacle's centroid toward the player's
//! center before its depth is measured, so the depth is the distance that
//! pushes the player out on that side. When neither projection contains the
//! other this equals the interval overlap.

use super::primitives::{Aabb, ConvexPolygon};
use crate::foundation::math::Vec2;

/// Minimum translation that separates the player box from an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from the obstacle toward the player
    pub axis: Vec2,
    /// Penetration depth along `axis` (always > 0)
    pub depth: f64,
}

impl Contact {
    /// Translation to add to the player's position
    pub fn correction(&self) -> Vec2 {
        self.axis * self.depth
    }
}

/// Test `player` against `obstacle`
///
/// Returns `None` when a separating axis exists. Touching shapes (zero
/// overlap) are separate. On equal depths the earlier candidate axis wins.
pub fn resolve(player: &Aabb, obstacle: &ConvexPolygon) -> Option<Contact> {
    // Polygons always carry >= 3 vertices; keep the guard for hand-built ones.
    if obstacle.points().len() < 3 {
        return None;
    }

    let obstacle_to_player = player.center() - obstacle.centroid();
    let world_axes = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];

    let mut best: Option<Contact> = None;
    for axis in world_axes.iter().chain(obstacle.normals().iter()) {
        let p = player.project(axis);
        let o = obstacle.project(axis);
        if p.overlap(&o) <= 0.0 {
            return None;
        }

        let contact = if axis.dot(&obstacle_to_player) >= 0.0 {
            Contact {
                axis: *axis,
                depth: o.max - p.min,
            }
        } else {
            Contact {
                axis: -axis,
                depth: p.max - o.min,
            }
        };

        if best.map_or(true, |current| contact.depth < current.depth) {
            best = Some(contact);
        }
    }

    best
}
