//! Config command implementation
//!
//! Shows, validates and initialises the configuration file.

use super::run::{resolve_config, RunOptions};
use crate::cli::args::{ConfigCommands, OutputFormat, RunArgs};
use crate::cli::output::{print_output, ConfigCheck};
use crate::config::{Config, ConfigFile, Credentials};
use crate::error::{ConfigError, Result};
use crate::services::Pipeline;
use std::path::Path;

/// Execute config commands
pub fn run_config(command: &ConfigCommands, options: &RunOptions) -> Result<()> {
    match command {
        ConfigCommands::Show => run_config_show(options),
        ConfigCommands::Check => run_config_check(options),
        ConfigCommands::Init { path, force } => {
            let path = path.clone().unwrap_or_else(ConfigFile::user_path);
            run_config_init(&path, *force)
        }
    }
}

fn run_config_show(options: &RunOptions) -> Result<()> {
    let config = resolve_config(options, &RunArgs::default())?;

    match options.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config).map_err(|e| {
                ConfigError::ParseError(format!("Failed to serialize: {}", e))
            })?;
            println!("{}", json);
        }
        _ => print!("{}", toml::to_string_pretty(&config).map_err(ConfigError::from)?),
    }

    Ok(())
}

fn run_config_check(options: &RunOptions) -> Result<()> {
    let config = resolve_config(options, &RunArgs::default())?;
    let pipeline = Pipeline::from_config(&config, &Credentials::from_env())?;

    let check = ConfigCheck {
        indicators: config
            .indicators
            .enabled()
            .iter()
            .map(|i| i.name().to_string())
            .collect(),
        thresholds: config.thresholds.len(),
        output_path: config.general.output_path.display().to_string(),
        alerts_enabled: pipeline.alerts_enabled(),
    };
    print_output(&check, options.format)?;

    Ok(())
}

/// Write the default configuration to `path`
pub fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            key: "path".to_string(),
            message: format!("{} already exists (use --force to overwrite)", path.display()),
        }
        .into());
    }

    ConfigFile::save(&Config::default(), path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
