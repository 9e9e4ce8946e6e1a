//! Configuration system
//!
//! Handles TOML config file parsing, CLI argument merging and
//! environment-supplied credentials.

pub mod builder;
pub mod env;
pub mod file;

pub use builder::ConfigBuilder;
pub use env::{Credentials, MessagingCredentials};
pub use file::ConfigFile;

use crate::domain::{Indicator, ThresholdTable};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Alert ceilings by indicator name
    pub thresholds: ThresholdTable,
    /// Per-indicator source settings
    pub indicators: IndicatorsConfig,
    /// Alert dispatch settings
    pub alerts: AlertsConfig,
}

impl Config {
    /// Validate values that serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "general.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if self.general.output_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "general.output_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        for (name, ceiling) in self.thresholds.iter() {
            if !ceiling.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: format!("thresholds.{}", name),
                    message: format!("{} is not a finite number", ceiling),
                });
            }
        }

        for name in self.thresholds.unknown_names() {
            log::warn!("Threshold '{}' does not match any indicator", name);
        }

        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log the alert instead of sending it
    pub dry_run: bool,
    /// HTML dashboard location, overwritten every run
    pub output_path: PathBuf,
    /// Optional JSON snapshot location
    pub json_output_path: Option<PathBuf>,
    /// Per-request timeout for metric sources in seconds
    pub timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            output_path: PathBuf::from("index.html"),
            json_output_path: None,
            timeout_secs: 10,
        }
    }
}

/// Source settings for one indicator
///
/// `url` and `params` are overlaid on the built-in defaults for the indicator,
/// so a table only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Whether the indicator is collected at all
    pub enabled: bool,
    /// Endpoint override
    pub url: Option<String>,
    /// Extra or overriding query parameters (e.g. time windows)
    pub params: BTreeMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            params: BTreeMap::new(),
        }
    }
}

/// Per-indicator source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct IndicatorsConfig {
    pub mvrv_z_score: SourceConfig,
    pub puell_multiple: SourceConfig,
    pub log_upper_band: SourceConfig,
    pub hodl_wave_30d: SourceConfig,
    pub funding_rate: SourceConfig,
    pub google_trends: SourceConfig,
}

impl IndicatorsConfig {
    /// Get the source settings for an indicator
    pub fn get(&self, indicator: Indicator) -> &SourceConfig {
        match indicator {
            Indicator::MvrvZScore => &self.mvrv_z_score,
            Indicator::PuellMultiple => &self.puell_multiple,
            Indicator::LogUpperBand => &self.log_upper_band,
            Indicator::HodlWave30d => &self.hodl_wave_30d,
            Indicator::FundingRate => &self.funding_rate,
            Indicator::GoogleTrends => &self.google_trends,
        }
    }

    /// Enabled indicators in declaration order
    pub fn enabled(&self) -> Vec<Indicator> {
        Indicator::ALL
            .into_iter()
            .filter(|i| self.get(*i).enabled)
            .collect()
    }
}

/// What to do when messaging credentials are absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPolicy {
    /// Disable alerting and say so in the log
    #[default]
    Skip,
    /// Refuse to start
    Fail,
}

/// Alert dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertsConfig {
    /// Whether SMS alerts are wanted at all
    pub enabled: bool,
    /// Behaviour when Twilio credentials are missing
    pub on_missing_credentials: CredentialPolicy,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            on_missing_credentials: CredentialPolicy::Skip,
        }
    }
}
