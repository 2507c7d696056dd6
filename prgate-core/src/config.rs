//! Configuration management for prgate
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (PRGATE_*)
//! 3. Config file (~/.config/prgate/config.toml, or --config)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::policy::PolicyTable;
use crate::{Error, Result};

/// Retry behaviour for transient API failures
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry
    #[serde(with = "humantime_serde")]
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Branch classification and size limits
    pub policy: PolicyTable,

    /// Retry settings for API calls
    pub retry: RetryPolicy,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/prgate/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("prgate").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(Error::Config("retry.max_attempts must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - PRGATE_MAX_ATTEMPTS: total attempts per API call
    pub fn with_env_overrides(self) -> Result<Self> {
        match std::env::var("PRGATE_MAX_ATTEMPTS") {
            Ok(value) => {
                let attempts = value.trim().parse::<u32>().map_err(|e| {
                    Error::Config(format!("Invalid PRGATE_MAX_ATTEMPTS '{}': {}", value, e))
                })?;
                Ok(self.with_cli_overrides(Some(attempts)))
            }
            Err(_) => Ok(self),
        }
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, max_attempts: Option<u32>) -> Self {
        if let Some(attempts) = max_attempts {
            self.retry.max_attempts = attempts;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(path: Option<&Path>, max_attempts: Option<u32>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };

        let config = base
            .with_env_overrides()?
            .with_cli_overrides(max_attempts);
        config.validate()?;
        Ok(config)
    }
}
