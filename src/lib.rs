//! cyclewatch - Bitcoin cycle indicator dashboard library
//!
//! This library provides the pipeline that polls market indicators, checks
//! them against thresholds, renders a static status page and sends alerts.
//!
//! # Modules
//!
//! - [`alerts`]: Threshold checking and alert dispatch
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Indicators, readings, thresholds and reports
//! - [`error`]: Error types
//! - [`render`]: HTML and JSON report rendering
//! - [`services`]: Indicator evaluation and the run pipeline
//! - [`sources`]: HTTP abstraction and indicator collectors

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod services;
pub mod sources;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
