//! Grounded/airborne tracking with coyote time and jump buffering

use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

/// Whether the player is supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    /// Supported by an obstacle or the world floor this tick
    Grounded,
    /// Not supported
    #[default]
    Airborne,
}

/// Movement state plus both grace timers
///
/// Both timers stay within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementController {
    state: MovementState,
    coyote_timer: f64,
    jump_buffer_timer: f64,
    jump_was_held: bool,
}

impl MovementController {
    /// Current state
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Seconds left in which a jump still counts as from the ground
    pub fn coyote_timer(&self) -> f64 {
        self.coyote_timer
    }

    /// Seconds left in which an early jump press is remembered
    pub fn jump_buffer_timer(&self) -> f64 {
        self.jump_buffer_timer
    }

    /// Start-of-tick jump buffer update
    ///
    /// A rising edge of `jump_held` refills the buffer regardless of state;
    /// otherwise it decays.
    pub fn update_timers(&mut self, jump_held: bool, dt: f64, config: &PhysicsConfig) {
        if jump_held && !self.jump_was_held {
            self.jump_buffer_timer = config.jump_buffer_time;
        } else {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }
        self.jump_was_held = jump_held;
    }

    /// Consume both timers if a jump may fire; the caller applies the launch
    pub fn try_jump(&mut self) -> bool {
        if self.coyote_timer > 0.0 && self.jump_buffer_timer > 0.0 {
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            self.state = MovementState::Airborne;
            true
        } else {
            false
        }
    }

    /// End-of-tick transition from this tick's support
    ///
    /// Landing fills coyote time. Every unsupported tick drains it, including
    /// the one that left the ground, so the window is exactly `coyote_time`.
    pub fn finish_tick(&mut self, supported: bool, dt: f64, config: &PhysicsConfig) {
        if supported {
            if self.state != MovementState::Grounded {
                self.coyote_timer = config.coyote_time;
            }
            self.state = MovementState::Grounded;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
            self.state = MovementState::Airborne;
        }
    }

    /// Zero both timers and go airborne; the held jump is remembered so it
    /// does not count as a new press
    pub fn reset(&mut self) {
        self.state = MovementState::Airborne;
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 60.0;

    fn grounded(config: &PhysicsConfig) -> MovementController {
        let mut controller = MovementController::default();
        controller.finish_tick(true, DT, config);
        controller
    }

    #[test]
    fn test_starts_airborne_without_grace() {
        let mut controller = MovementController::default();
        assert_eq!(controller.state(), MovementState::Airborne);
        assert!(!controller.try_jump());
    }

    #[test]
    fn test_landing_fills_coyote_once() {
        let config = PhysicsConfig::default();
        let mut controller = grounded(&config);
        assert_relative_eq!(controller.coyote_timer(), config.coyote_time);

        controller.finish_tick(false, DT, &config);
        assert_relative_eq!(controller.coyote_timer(), config.coyote_time - DT);

        for _ in 0..20 {
            controller.finish_tick(false, DT, &config);
        }
        assert_eq!(controller.coyote_timer(), 0.0);
    }

    #[test]
    fn test_buffer_needs_rising_edge() {
        let config = PhysicsConfig::default();
        let mut controller = MovementController::default();

        controller.update_timers(true, DT, &config);
        assert_relative_eq!(controller.jump_buffer_timer(), config.jump_buffer_time);

        controller.update_timers(true, DT, &config);
        assert_relative_eq!(controller.jump_buffer_timer(), config.jump_buffer_time - DT);

        controller.update_timers(false, DT, &config);
        controller.update_timers(true, DT, &config);
        assert_relative_eq!(controller.jump_buffer_timer(), config.jump_buffer_time);
    }

    #[test]
    fn test_buffered_press_fires_on_landing() {
        let config = PhysicsConfig::default();
        let mut controller = MovementController::default();

        // Pressed 3 ticks before touching down
        controller.update_timers(true, DT, &config);
        assert!(!controller.try_jump());
        controller.finish_tick(false, DT, &config);
        controller.update_timers(true, DT, &config);
        controller.finish_tick(false, DT, &config);
        controller.update_timers(true, DT, &config);
        controller.finish_tick(true, DT, &config);

        controller.update_timers(true, DT, &config);
        assert!(controller.try_jump());
        assert_eq!(controller.state(), MovementState::Airborne);
        assert_eq!(controller.coyote_timer(), 0.0);
        assert_eq!(controller.jump_buffer_timer(), 0.0);

        // Holding the button does not jump again
        controller.finish_tick(true, DT, &config);
        controller.update_timers(true, DT, &config);
        assert!(!controller.try_jump());
    }

    #[test]
    fn test_stale_buffer_does_not_fire() {
        let config = PhysicsConfig::default();
        let mut controller = MovementController::default();
        controller.update_timers(true, DT, &config);
        for _ in 0..10 {
            controller.update_timers(false, DT, &config);
        }
        controller.finish_tick(true, DT, &config);
        controller.update_timers(false, DT, &config);
        assert!(!controller.try_jump());
    }

    #[test]
    fn test_reset_clears_timers() {
        let config = PhysicsConfig::default();
        let mut controller = grounded(&config);
        controller.update_timers(true, DT, &config);
        controller.reset();
        assert_eq!(controller.state(), MovementState::Airborne);
        assert_eq!(controller.coyote_timer(), 0.0);
        assert_eq!(controller.jump_buffer_timer(), 0.0);
    }

    #[test]
    fn test_coyote_window_starts_on_the_tick_support_is_lost() {
        let config = PhysicsConfig {
            coyote_time: 0.5,
            ..PhysicsConfig::default()
        };
        let dt = 0.25;
        let mut controller = MovementController::default();
        controller.finish_tick(true, dt, &config);

        // Walks off: first unsupported tick already spends coyote time
        controller.update_timers(false, dt, &config);
        controller.finish_tick(false, dt, &config);
        assert_relative_eq!(controller.coyote_timer(), 0.25);

        controller.update_timers(false, dt, &config);
        controller.finish_tick(false, dt, &config);
        assert_eq!(controller.coyote_timer(), 0.0);

        // Half a second after leaving the ground is too late
        controller.update_timers(true, dt, &config);
        assert!(!controller.try_jump());
    }

    #[test]
    fn test_coyote_jump_inside_window() {
        let config = PhysicsConfig {
            coyote_time: 0.5,
            ..PhysicsConfig::default()
        };
        let dt = 0.25;
        let mut controller = MovementController::default();
        controller.finish_tick(true, dt, &config);
        controller.update_timers(false, dt, &config);
        controller.finish_tick(false, dt, &config);

        controller.update_timers(true, dt, &config);
        assert!(controller.try_jump());
    }
}
