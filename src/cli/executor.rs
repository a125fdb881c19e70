//! Command executor for dispatching CLI commands
//!
//! Runs the parsed command against loaded settings and prints its JSON
//! result to stdout.

use serde_json::Value;
use std::sync::Arc;

use super::handlers::{
    CheckConfigHandler, EndpointCommandHandler, SendCommandHandler, push_message, send,
    sms_message,
};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};
use crate::error::SnsResult;
use crate::sns::{RusotoBroker, Sns};

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns errors from client construction or the command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    let environment = cli.environment();
    let output = run(&cli.command, settings, environment, |settings| {
        Ok(Sns::new(Arc::new(RusotoBroker::from_config(&settings.aws)?)))
    })
    .await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Dispatch a command. `connect` is only called by commands that talk to SNS.
async fn run<F>(
    command: &Commands,
    settings: Settings,
    environment: Environment,
    connect: F,
) -> anyhow::Result<Value>
where
    F: FnOnce(&Settings) -> SnsResult<Sns>,
{
    match command {
        Commands::CheckConfig => Ok(CheckConfigHandler::new(settings, environment).execute()),
        Commands::Sms(args) => {
            let message = sms_message(args, &settings.sms)?;
            if args.dry_run {
                return send::preview_sms(&message, &args.to);
            }
            SendCommandHandler::new(connect(&settings)?)
                .send(message.into(), &args.to)
                .await
        }
        Commands::Push(args) => {
            let message = push_message(args);
            if args.dry_run {
                return send::preview_push(&message, &args.endpoint);
            }
            SendCommandHandler::new(connect(&settings)?)
                .send(message.into(), &args.endpoint)
                .await
        }
        Commands::Register(args) => {
            EndpointCommandHandler::new(connect(&settings)?)
                .register(args)
                .await
        }
        Commands::SetAttributes(args) => {
            EndpointCommandHandler::new(connect(&settings)?)
                .set_attributes(args)
                .await
        }
    }
}
