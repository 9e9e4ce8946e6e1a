//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod config;
pub mod run;

pub use config::run_config;
pub use run::{run_dashboard, RunOptions};
