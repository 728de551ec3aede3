//! # Configuration Management Module
//!
//! Centralized configuration for the concierge engine: type-safe structures
//! with serde serialization, validation on load, and sensible defaults.
//!
//! The configuration is organized into logical sections:
//!
//! - [`WorldConfig`] - Deployment name and world document location
//! - [`MovementConfig`] - Cooldown windows per travel mode
//! - [`LoggingConfig`] - Logging level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use concierge::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("concierge.toml").await?;
//!     println!("World: {}", config.world.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [world]
//! name = "Hotel Eclipse"
//! data_file = "data/world.json"
//!
//! [movement]
//! walk_cooldown_secs = 300
//! bus_cooldown_secs = 3600
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::world::MoveMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    #[serde(default)]
    pub movement: MovementConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Display name of the deployment.
    pub name: String,
    /// Path of the persisted world document.
    pub data_file: String,
}

/// Cooldown windows per travel mode, in whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    #[serde(default = "default_walk_cooldown_secs")]
    pub walk_cooldown_secs: i64,
    #[serde(default = "default_bus_cooldown_secs")]
    pub bus_cooldown_secs: i64,
}

fn default_walk_cooldown_secs() -> i64 {
    300
}

fn default_bus_cooldown_secs() -> i64 {
    3600
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_cooldown_secs: default_walk_cooldown_secs(),
            bus_cooldown_secs: default_bus_cooldown_secs(),
        }
    }
}

impl MovementConfig {
    /// The configured wait window for a travel mode.
    pub fn threshold(&self, mode: MoveMode) -> chrono::Duration {
        match mode {
            MoveMode::Walk => chrono::Duration::seconds(self.walk_cooldown_secs),
            MoveMode::Bus => chrono::Duration::seconds(self.bus_cooldown_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                name: "Hotel Eclipse".to_string(),
                data_file: "data/world.json".to_string(),
            },
            movement: MovementConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a starter configuration file with default values.
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())?;
        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.world.name.trim().is_empty() {
            return Err(anyhow!("world.name cannot be empty"));
        }
        if self.world.data_file.trim().is_empty() {
            return Err(anyhow!("world.data_file cannot be empty"));
        }
        if self.movement.walk_cooldown_secs < 0 {
            return Err(anyhow!("movement.walk_cooldown_secs cannot be negative"));
        }
        if self.movement.bus_cooldown_secs < 0 {
            return Err(anyhow!("movement.bus_cooldown_secs cannot be negative"));
        }
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow!(
                "logging.level must be one of {:?}",
                VALID_LOG_LEVELS
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        Config::default().validate().expect("default is valid");
    }

    #[test]
    fn thresholds_map_modes_to_configured_windows() {
        let movement = MovementConfig::default();
        assert_eq!(movement.threshold(MoveMode::Walk).num_seconds(), 300);
        assert_eq!(movement.threshold(MoveMode::Bus).num_seconds(), 3600);
    }

    #[test]
    fn movement_section_is_optional_in_toml() {
        let toml = r#"
            [world]
            name = "Test World"
            data_file = "world.json"

            [logging]
            level = "warn"
        "#;
        let config: Config = toml::from_str(toml).expect("parse");
        config.validate().expect("valid");
        assert_eq!(config.movement.walk_cooldown_secs, 300);
        assert_eq!(config.movement.bus_cooldown_secs, 3600);
    }

    #[test]
    fn bogus_log_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
