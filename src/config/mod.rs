//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::Weights;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Scoring parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Parallel fields per round
    #[serde(default = "default_num_fields")]
    pub num_fields: usize,

    /// Pool size; defaults to the players observed in the schedule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_players: Option<usize>,

    /// Index name -> loss weight
    #[serde(default = "Weights::recommended")]
    pub weights: Weights,
}

fn default_num_fields() -> usize {
    1
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            num_fields: default_num_fields(),
            num_players: None,
            weights: Weights::recommended(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.num_fields == 0 {
            return Err(ConfigError::ValidationError(
                "num_fields must be greater than 0".to_string(),
            ));
        }

        if let Some((name, weight)) = self.scoring.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "weight for {} must be finite, got {}",
                name, weight
            )));
        }

        Ok(())
    }
}
