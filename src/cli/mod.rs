//! CLI module for sns-channel
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration loading with CLI overrides
//! - Command handlers for sending messages and managing endpoints

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands};

use crate::config::{ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load configuration for the environment and file selected on the command line
///
/// # Errors
/// Returns error if a config file cannot be read or the settings fail validation
pub fn load_config(cli: &Cli) -> anyhow::Result<Settings> {
    let mut loader = ConfigLoader::new()?.with_environment(cli.environment());
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }
    Ok(loader.load()?)
}

/// Initialize logger from settings, applying `--verbose` or `--quiet`
pub fn init_logger_from_settings(settings: &Settings, cli: &Cli) -> anyhow::Result<()> {
    let mut config = settings.logger.clone().into_logger_config()?;
    if let Some(level) = cli.log_level_override() {
        config = config.with_level(level);
    }
    init_logger(config)
}
