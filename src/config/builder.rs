//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist; otherwise the default locations are
    /// searched and the built-in defaults kept if none is found.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = if let Some(path) = path {
            Some(ConfigFile::load(path)?)
        } else {
            ConfigFile::load_default()
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        if let Some(d) = dry_run {
            self.config.general.dry_run = d;
        }
        self
    }

    /// Override with CLI output path
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        if let Some(o) = output {
            self.config.general.output_path = o;
        }
        self
    }

    /// Override with CLI JSON snapshot path
    pub fn with_json_output(mut self, output: Option<PathBuf>) -> Self {
        if let Some(o) = output {
            self.config.general.json_output_path = Some(o);
        }
        self
    }

    /// Override with CLI request timeout
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        if let Some(s) = secs {
            self.config.general.timeout_secs = s;
        }
        self
    }

    /// Disable alert dispatch regardless of credentials
    pub fn with_alerts_disabled(mut self, disabled: bool) -> Self {
        if disabled {
            self.config.alerts.enabled = false;
        }
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
