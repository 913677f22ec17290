//! The binary entry point for the clavier demo.

use std::process::ExitCode;

use clap::Parser;
use clavier_config::{CliArgs, Config};
use clavier_demo::app::{self, App};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = Config::load_or_create(&config_dir).map(|mut config| {
        config.apply_cli_overrides(&args);
        config
    });

    let log_dir = config_dir.join("logs");
    clavier_log::init_logging(
        Some(&log_dir),
        cfg!(debug_assertions),
        config.as_ref().ok(),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config from {}: {e}", config_dir.display());
            return ExitCode::FAILURE;
        }
    };
    info!(config_dir = %config_dir.display(), "Starting clavier demo");

    let app = match App::new(config) {
        Ok(app) => app.with_config_dir(config_dir),
        Err(e) => {
            error!("Invalid input configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app::run(app) {
        error!("Event loop failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
