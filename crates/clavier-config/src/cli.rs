//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use clavier::ComboOrder;

use crate::{Config, ConfigError};

/// Clavier demo command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "clavier-demo", about = "Frame-based input state demo")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Combo identity: "ordered" or "canonical".
    #[arg(long)]
    pub combo_order: Option<ComboOrder>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log every control transition.
    #[arg(long)]
    pub trace_transitions: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The config directory: `--config` if given, else the platform default.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        self.config
            .clone()
            .or_else(Config::default_dir)
            .ok_or(ConfigError::NoConfigDir)
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(order) = args.combo_order {
            self.input.combo_order = order;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.trace_transitions {
            self.debug.trace_transitions = true;
        }
    }
}
