//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`STRATUM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use stratum_physics::MovementConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Movement resolution settings
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Which room to load and how to scale it
    #[serde(default)]
    pub room: RoomConfig,
    /// Headless run settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`STRATUM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // user overrides are optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // STRATUM_PHYSICS__GRAVITY=0.5 -> physics.gravity = 0.5
        figment = figment.merge(Env::prefixed("STRATUM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Lowest vertical velocity per tick (negative = down)
    pub terminal_velocity: f32,
    /// Let grounded movers climb and descend one-unit steps
    pub slope_traversal: bool,
    /// Slide around clipped corners
    pub glancing_correction: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let movement = MovementConfig::default();
        Self {
            gravity: movement.gravity,
            terminal_velocity: movement.terminal_velocity,
            slope_traversal: movement.slope_traversal,
            glancing_correction: movement.glancing_correction,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the engine's movement configuration
    pub fn to_movement_config(&self) -> MovementConfig {
        MovementConfig {
            gravity: self.gravity,
            terminal_velocity: self.terminal_velocity,
            slope_traversal: self.slope_traversal,
            glancing_correction: self.glancing_correction,
        }
    }
}

/// Room configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Path to the RON room file
    pub path: String,
    /// Pixels per tile unit
    pub tile_size: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            path: "rooms/demo.ron".to_string(),
            tile_size: 16,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks to run before exiting
    pub ticks: u64,
    /// Player walking speed in pixels per tick
    pub player_speed: f32,
    /// Player spawn [x, y, z] in tiles, used when the room has none
    pub player_spawn: [f32; 3],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 240,
            player_speed: 1.0,
            player_spawn: [1.0, 1.0, 2.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log actor positions every N ticks (0 = never)
    pub report_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_interval: 30,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.room.tile_size, 16);
        assert_eq!(config.physics.gravity, 0.25);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_physics_to_movement_config() {
        let physics = PhysicsConfig {
            gravity: 0.5,
            terminal_velocity: -4.0,
            slope_traversal: false,
            glancing_correction: true,
        };
        let movement = physics.to_movement_config();
        assert_eq!(movement.gravity, 0.5);
        assert_eq!(movement.terminal_velocity, -4.0);
        assert!(!movement.slope_traversal);
        assert!(movement.glancing_correction);
    }

    #[test]
    fn test_default_physics_matches_engine() {
        assert_eq!(PhysicsConfig::default().to_movement_config(), MovementConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("tile_size"));
        assert!(toml.contains("gravity"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[physics]\ngravity = 1.0\n").unwrap();
        assert_eq!(config.physics.gravity, 1.0);
        assert_eq!(config.physics.terminal_velocity, -6.0);
        assert_eq!(config.room.path, "rooms/demo.ron");
    }
}
