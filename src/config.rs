//! Configuration management for pwseal
//!
//! The only tunable is the PBKDF2 iteration range used by
//! [`crate::random_iterations`] and [`crate::pin_iterations`]. It is always
//! handed to those functions explicitly.

use crate::crypto::IterationRange;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable overriding the lower iteration bound
pub const ENV_MIN_ITERATIONS: &str = "PWSEAL_MIN_ITERATIONS";

/// Environment variable overriding the upper iteration bound
pub const ENV_MAX_ITERATIONS: &str = "PWSEAL_MAX_ITERATIONS";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// PBKDF2 iteration range
    #[serde(default)]
    pub iterations: IterationRange,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl Config {
    /// Load configuration from a file (YAML or JSON), with environment variable overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let content = std::fs::read_to_string(path_ref)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = if is_yaml(path_ref) {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse YAML config: {}", e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse JSON config: {}", e)))?
        };

        config.apply_env_overrides()?;
        config.validate()?;

        debug!("Loaded config from {:?}", path_ref);
        Ok(config)
    }

    /// Build the default configuration with environment variable overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let min = env_u32(ENV_MIN_ITERATIONS)?.unwrap_or(self.iterations.min());
        let max = env_u32(ENV_MAX_ITERATIONS)?.unwrap_or(self.iterations.max());

        self.iterations = IterationRange::new(min, max)
            .map_err(|e| Error::InvalidConfig(format!("iteration range: {}", e)))?;
        Ok(())
    }

    /// Save configuration to a file (format determined by extension)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path_ref = path.as_ref();

        let content = if is_yaml(path_ref) {
            serde_yaml::to_string(self)
                .map_err(|e| Error::Config(format!("Failed to serialize config to YAML: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::Config(format!("Failed to serialize config to JSON: {}", e)))?
        };

        std::fs::write(path_ref, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.iterations
            .validate()
            .map_err(|e| Error::InvalidConfig(format!("iteration range: {}", e)))
    }
}

fn env_u32(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::InvalidConfig(format!("Invalid {}: {:?}", name, value))),
        Err(_) => Ok(None),
    }
}
