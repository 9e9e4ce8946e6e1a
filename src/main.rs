//! cyclewatch - Bitcoin cycle indicator dashboard
//!
//! Collects market indicators once, writes a static HTML dashboard and sends
//! an SMS alert when an indicator is above its threshold.

use clap::Parser;
use cyclewatch::cli::args::{generate_completions, Cli, Commands, RunArgs};
use cyclewatch::commands::{run_config, run_dashboard, RunOptions};
use cyclewatch::error::{AppError, ConfigError};

fn main() {
    // Secrets may live in a local .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let env = env_logger::Env::default().default_filter_or(cli.log_filter());
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let options = RunOptions {
        config_path: cli.config.clone(),
        dry_run: cli.dry_run,
        format: cli.format,
    };

    match &cli.command {
        None => run_dashboard(&options, &RunArgs::default()),

        Some(Commands::Run(args)) => run_dashboard(&options, args),

        Some(Commands::Config(args)) => run_config(&args.command, &options),

        Some(Commands::Completions { shell }) => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::MissingField(field)) if field.contains("GLASSNODE") => {
            eprintln!();
            eprintln!("Hint: Set GLASSNODE_API_KEY, or disable the indicator with");
            eprintln!("      [indicators.hodl_wave_30d] enabled = false");
        }
        AppError::Config(ConfigError::MissingField(_)) => {
            eprintln!();
            eprintln!("Hint: Set the Twilio variables, or use");
            eprintln!("      [alerts] on_missing_credentials = \"skip\"");
        }
        AppError::Render(_) => {
            eprintln!();
            eprintln!("Hint: Check that the output directory is writable.");
        }
        _ => {}
    }
}
