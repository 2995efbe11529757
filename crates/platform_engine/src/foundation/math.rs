//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation. Screen conventions
//! apply throughout: +X points right, +Y points down.

pub use nalgebra::Vector2;

/// 2D vector type (double precision, so snapshots round-trip losslessly)
pub type Vec2 = Vector2<f64>;

/// Unit vector pointing "up" in world space (negative Y)
pub fn up() -> Vec2 {
    Vec2::new(0.0, -1.0)
}

/// Unit vector pointing "down" in world space (positive Y)
pub fn down() -> Vec2 {
    Vec2::new(0.0, 1.0)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = PI / 180.0;

    /// Tolerance used when comparing lengths and projections
    pub const EPSILON: f64 = 1e-9;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// Move `current` toward `target` by at most `max_delta`, never overshooting
    pub fn move_toward(current: f64, target: f64, max_delta: f64) -> f64 {
        let delta = target - current;
        if delta.abs() <= max_delta {
            target
        } else {
            current + max_delta.copysign(delta)
        }
    }

    /// Rotate a vector around the origin by `radians` (clockwise on screen)
    pub fn rotate(v: Vec2, radians: f64) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    }

    /// Left-hand perpendicular of a vector
    pub fn perp(v: Vec2) -> Vec2 {
        Vec2::new(v.y, -v.x)
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(a: Vec2, b: Vec2) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Whether both components are finite
    pub fn is_finite(v: Vec2) -> bool {
        v.x.is_finite() && v.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_move_toward_does_not_overshoot() {
        assert_relative_eq!(move_toward(0.0, 10.0, 3.0), 3.0);
        assert_relative_eq!(move_toward(9.0, 10.0, 3.0), 10.0);
        assert_relative_eq!(move_toward(-1.0, 0.0, 5.0), 0.0);
        assert_relative_eq!(move_toward(5.0, -5.0, 2.0), 3.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate(Vec2::new(1.0, 0.0), deg_to_rad(90.0));
        assert_relative_eq!(rotated, Vec2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_perp_is_orthogonal() {
        let v = Vec2::new(3.0, -2.0);
        assert_relative_eq!(perp(v).dot(&v), 0.0);
        assert_relative_eq!(cross(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)), 1.0);
    }
}
