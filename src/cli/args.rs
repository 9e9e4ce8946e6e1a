//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Bitcoin cycle indicator dashboard
///
/// Polls market indicators, writes a static HTML dashboard and sends an SMS
/// when any indicator is above its threshold. Runs the dashboard when no
/// subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "cyclewatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the run summary
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CYCLEWATCH_CONFIG")]
    pub config: Option<String>,

    /// Dry run mode - log the alert instead of sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect indicators, write the dashboard and send alerts (default)
    Run(RunArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the run command
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// HTML output path (default: index.html)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a JSON snapshot to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Per-request timeout for metric sources in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: Option<u64>,

    /// Never send SMS alerts this run
    #[arg(long)]
    pub no_alerts: bool,
}

/// Arguments for config commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Validate configuration and credentials without fetching anything
    Check,

    /// Write the default configuration to a file
    Init {
        /// Destination (default: user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_subcommand_runs() {
        let args = Cli::try_parse_from(["cyclewatch"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["cyclewatch", "-v", "run"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn test_cli_default_log_filter() {
        let args = Cli::try_parse_from(["cyclewatch", "run"]).unwrap();
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_cli_parse_run_args() {
        let args = Cli::try_parse_from([
            "cyclewatch",
            "--dry-run",
            "run",
            "--output",
            "public/index.html",
            "--json-output",
            "public/report.json",
            "--timeout",
            "5",
            "--no-alerts",
        ])
        .unwrap();

        assert!(args.dry_run);
        if let Some(Commands::Run(run)) = args.command {
            assert_eq!(run.output, Some(PathBuf::from("public/index.html")));
            assert_eq!(run.json_output, Some(PathBuf::from("public/report.json")));
            assert_eq!(run.timeout, Some(5));
            assert!(run.no_alerts);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_timeout_validation() {
        let result = Cli::try_parse_from(["cyclewatch", "run", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_config_init() {
        let args =
            Cli::try_parse_from(["cyclewatch", "config", "init", "my.toml", "--force"]).unwrap();
        if let Some(Commands::Config(cfg)) = args.command {
            if let ConfigCommands::Init { path, force } = cfg.command {
                assert_eq!(path, Some(PathBuf::from("my.toml")));
                assert!(force);
            } else {
                panic!("Expected Init command");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_format() {
        let args = Cli::try_parse_from(["cyclewatch", "--format", "json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }
}
