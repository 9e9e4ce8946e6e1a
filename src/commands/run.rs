//! Run command implementation
//!
//! Executes the dashboard pipeline once.

use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::output::print_output;
use crate::config::{Config, ConfigBuilder, Credentials};
use crate::error::Result;
use crate::services::Pipeline;
use crate::sources::HttpClient;
use std::time::Duration;

/// Global options that affect a run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: Option<String>,
    pub dry_run: bool,
    pub format: OutputFormat,
}

/// Merge the config file with CLI overrides
pub fn resolve_config(options: &RunOptions, args: &RunArgs) -> Result<Config> {
    let config = ConfigBuilder::new()
        .with_file(options.config_path.as_deref())?
        .with_dry_run(options.dry_run.then_some(true))
        .with_output(args.output.clone())
        .with_json_output(args.json_output.clone())
        .with_timeout(args.timeout)
        .with_alerts_disabled(args.no_alerts)
        .build()?;
    Ok(config)
}

/// Collect, render and alert once
pub fn run_dashboard(options: &RunOptions, args: &RunArgs) -> Result<()> {
    let config = resolve_config(options, args)?;
    let credentials = Credentials::from_env();
    log::debug!("Credentials: {:?}", credentials);

    let pipeline = Pipeline::from_config(&config, &credentials)?;
    let client = HttpClient::new(Duration::from_secs(config.general.timeout_secs))?;

    let summary = pipeline.run(&client, chrono::Utc::now())?;
    print_output(&summary, options.format)?;

    Ok(())
}
