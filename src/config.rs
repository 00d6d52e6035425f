// Configuration module for reading Snake.toml
// Holds the appearance metadata, the rule toggles used by the move selector,
// and the debug log settings.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::selector::MoveSelector;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub rules: RulesConfig,
    pub debug: DebugConfig,
}

/// Metadata returned from GET /
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Head-to-head rule toggles
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RulesConfig {
    /// Meeting an opponent of equal length head-on counts as a loss
    pub equal_length_head_to_head_is_loss: bool,
    /// Cells next to an opponent head are contested as well as the head itself
    pub contest_opponent_reach: bool,
}

impl RulesConfig {
    pub fn selector(&self) -> MoveSelector {
        MoveSelector::new(
            self.equal_length_head_to_head_is_loss,
            self.contest_opponent_reach,
        )
    }
}

/// JSONL decision log settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                author: "safe-step".to_string(),
                color: "#3E8E41".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
                version: "1.0.0".to_string(),
            },
            rules: RulesConfig {
                equal_length_head_to_head_is_loss: true,
                contest_opponent_reach: true,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
