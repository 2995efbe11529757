//! Semi-implicit Euler integration and world-bound clamping

use super::body::Body;
use super::collision_system::ContactFlags;
use crate::config::PhysicsConfig;
use crate::foundation::math::utils;
use crate::world::WorldBounds;

/// Advance `body` by `dt` seconds
///
/// `direction` is -1, 0 or 1. A held direction accelerates toward the speed
/// cap on that side; no direction applies friction, which stops at zero
/// rather than reversing. Velocity is updated before position.
pub fn integrate(body: &mut Body, direction: f64, config: &PhysicsConfig, dt: f64) {
    let vx = if direction == 0.0 {
        utils::move_toward(body.velocity.x, 0.0, config.friction * dt)
    } else {
        utils::move_toward(
            body.velocity.x,
            direction.signum() * config.max_speed,
            config.acceleration * dt,
        )
    };
    body.velocity.x = vx.clamp(-config.max_speed, config.max_speed);

    body.velocity.y += config.gravity * dt;
    if let Some(cap) = config.terminal_velocity {
        body.velocity.y = body.velocity.y.min(cap);
    }

    body.position += body.velocity * dt;
}

/// Keep `body` inside the world
///
/// Returns [`ContactFlags::FLOOR`] when the bottom edge was clamped to the
/// world floor, which also stops any downward motion.
pub fn clamp_to_bounds(body: &mut Body, bounds: &WorldBounds) -> ContactFlags {
    let max_x = (bounds.width - body.width).max(0.0);
    body.position.x = body.position.x.clamp(0.0, max_x);

    let floor = bounds.height - body.height;
    if body.position.y > floor {
        body.position.y = floor;
        body.velocity.y = body.velocity.y.min(0.0);
        ContactFlags::FLOOR
    } else {
        ContactFlags::empty()
    }
}
