//! Configuration file loading
//!
//! Handles loading and saving configuration as TOML.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Option<Config> {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
                }
            }
        }
        None
    }

    /// Write configuration to a file, creating parent directories
    pub fn save<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(config)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::InvalidValue {
                key: "path".to_string(),
                message: format!("cannot create {}: {}", parent.display(), e),
            })?;
        }

        std::fs::write(path, contents).map_err(|e| ConfigError::InvalidValue {
            key: "path".to_string(),
            message: format!("cannot write {}: {}", path.display(), e),
        })
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/cyclewatch/config.toml"));

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cyclewatch").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("cyclewatch.toml"));
        paths.push(PathBuf::from(".cyclewatch.toml"));

        paths
    }

    /// Preferred location for a newly written config
    pub fn user_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("cyclewatch").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("cyclewatch.toml"))
    }
}
