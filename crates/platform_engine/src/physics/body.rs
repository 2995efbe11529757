//! Kinematic body moved by the integrator and the collision system

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::foundation::math::Vec2;

/// Axis-aligned box with a velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl Body {
    /// Body at rest at `position`
    pub fn at_rest(position: Vec2, width: f64, height: f64) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            width,
            height,
        }
    }

    /// Collision box at the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::from_position_size(self.position, self.width, self.height)
    }
}
