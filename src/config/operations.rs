//! Config loading, override, and validation operations.

use super::model::{Config, ConfigOverrides};
use crate::error::{JlockError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(JlockError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            JlockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| JlockError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective config: defaults, then the file, then the CLI.
    pub fn resolve(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides in place.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(journal) = &overrides.journal {
            self.journal = journal.clone();
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(rounds) = overrides.rounds {
            self.rounds = rounds;
        }
        if overrides.no_sync {
            self.sync = false;
        }
        if overrides.no_prompt {
            self.prompts = false;
        }
        if overrides.no_wait {
            self.wait = false;
        }
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `journal` must be non-empty
    /// - `fallback_line` must not contain line breaks
    /// - `rounds` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.journal.as_os_str().is_empty() {
            return Err(JlockError::ConfigError(
                "config validation failed: journal must not be empty".to_string(),
            ));
        }

        if self.fallback_line.contains(['\n', '\r']) {
            return Err(JlockError::ConfigError(
                "config validation failed: fallback_line must be a single line".to_string(),
            ));
        }

        if self.rounds == 0 {
            return Err(JlockError::ConfigError(
                "config validation failed: rounds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
