use clap::Parser;
use tracing::debug;

use sns_channel::cli::{Cli, execute_command, init_logger_from_settings, load_config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match load_config(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logger_from_settings(&settings, &cli) {
        eprintln!("Logger initialization error: {:#}", e);
        std::process::exit(2);
    }

    debug!(
        version = sns_channel::pkg_version(),
        environment = %cli.environment(),
        "Starting sns-channel"
    );

    if let Err(e) = execute_command(&cli, settings).await {
        tracing::error!(error = %format!("{:#}", e), "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
