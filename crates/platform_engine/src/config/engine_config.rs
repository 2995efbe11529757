//! Engine tunables
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! values it changes.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Movement and collision tunables. Units are world units and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f64,
    /// Horizontal speed cap (units/s)
    pub max_speed: f64,
    /// Horizontal acceleration while a direction is held (units/s²)
    pub acceleration: f64,
    /// Horizontal deceleration with no direction held (units/s²)
    pub friction: f64,
    /// Launch speed of a jump (units/s, applied upward)
    pub jump_velocity: f64,
    /// Launch speed imposed by bounce pads (units/s, applied upward)
    pub bounce_velocity: f64,
    /// Horizontal velocity multiplier on ice (> 1)
    pub ice_factor: f64,
    /// Horizontal velocity multiplier on sticky surfaces (< 1)
    pub sticky_factor: f64,
    /// Coyote window in seconds
    pub coyote_time: f64,
    /// Jump buffer window in seconds
    pub jump_buffer_time: f64,
    /// Minimum dot product with "up" for a contact to count as ground
    pub ground_threshold: f64,
    /// Resolution passes per tick
    pub resolve_iterations: u32,
    /// Optional cap on falling speed; `None` leaves falls uncapped
    pub terminal_velocity: Option<f64>,
    /// Player box width
    pub player_width: f64,
    /// Player box height
    pub player_height: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1600.0,
            max_speed: 300.0,
            acceleration: 2400.0,
            friction: 2000.0,
            jump_velocity: 800.0,
            bounce_velocity: 1200.0,
            ice_factor: 1.02,
            sticky_factor: 0.6,
            coyote_time: 0.1,
            jump_buffer_time: 0.12,
            ground_threshold: 0.5,
            resolve_iterations: 3,
            terminal_velocity: None,
            player_width: 40.0,
            player_height: 60.0,
        }
    }
}

impl PhysicsConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("gravity", self.gravity),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("jump_velocity", self.jump_velocity),
            ("bounce_velocity", self.bounce_velocity),
            ("ice_factor", self.ice_factor),
            ("sticky_factor", self.sticky_factor),
            ("coyote_time", self.coyote_time),
            ("jump_buffer_time", self.jump_buffer_time),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite non-negative number, got {value}"),
                });
            }
        }

        for (field, value) in [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive size, got {value}"),
                });
            }
        }

        if !(0.0..1.0).contains(&self.ground_threshold) {
            return Err(ConfigError::Invalid {
                field: "ground_threshold",
                reason: format!("expected a value in [0, 1), got {}", self.ground_threshold),
            });
        }

        if self.resolve_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "resolve_iterations",
                reason: "at least one resolution pass is required".to_string(),
            });
        }

        if let Some(cap) = self.terminal_velocity {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: "terminal_velocity",
                    reason: format!("expected a positive cap, got {cap}"),
                });
            }
        }

        Ok(())
    }
}

/// Scheduler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target tick rate in Hz
    pub tick_rate_hz: f64,
    /// Stop after this many ticks (`None` runs until stopped)
    pub max_ticks: Option<u64>,
    /// Warn when a tick's dt exceeds this many nominal periods
    pub stall_warn_factor: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            max_ticks: None,
            stall_warn_factor: 4.0,
        }
    }
}

impl TickConfig {
    /// Nominal seconds per tick
    pub fn period_secs(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    /// Reject values the scheduler cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate_hz",
                reason: format!("expected a positive rate, got {}", self.tick_rate_hz),
            });
        }
        Ok(())
    }
}

/// Player identity settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for name and color assignment
    pub seed: u64,
    /// Colors handed out to joining players
    pub palette: Vec<String>,
    /// Prefix of generated display names
    pub name_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            palette: ["#3b82f6", "#ef4444", "#facc15", "#10b981", "#a3e635"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            name_prefix: "Player".to_string(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Movement and collision tunables
    pub physics: PhysicsConfig,
    /// Scheduler settings
    pub tick: TickConfig,
    /// Player identity settings
    pub session: SessionConfig,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.tick.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [physics]
            gravity = 900.0
            terminal_velocity = 1500.0

            [tick]
            tick_rate_hz = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.physics.gravity, 900.0);
        assert_eq!(config.physics.terminal_velocity, Some(1500.0));
        assert_eq!(config.physics.max_speed, PhysicsConfig::default().max_speed);
        assert_eq!(config.tick.tick_rate_hz, 30.0);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_ron_config_parses() {
        let config =
            EngineConfig::from_ron_str("(physics: (resolve_iterations: 5), tick: (max_ticks: Some(10)))")
                .unwrap();
        assert_eq!(config.physics.resolve_iterations, 5);
        assert_eq!(config.tick.max_ticks, Some(10));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut physics = PhysicsConfig::default();
        physics.resolve_iterations = 0;
        assert!(matches!(
            physics.validate(),
            Err(ConfigError::Invalid { field: "resolve_iterations", .. })
        ));

        let mut physics = PhysicsConfig::default();
        physics.gravity = f64::NAN;
        assert!(physics.validate().is_err());

        let tick = TickConfig {
            tick_rate_hz: 0.0,
            ..TickConfig::default()
        };
        assert!(tick.validate().is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("platform_engine_cfg_{}.toml", std::process::id()));
        let mut config = EngineConfig::default();
        config.physics.coyote_time = 0.25;
        config.save_to_file(&path).unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = EngineConfig::load_from_file("settings.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = EngineConfig::from_toml_str(include_str!("../../../../config/engine.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
