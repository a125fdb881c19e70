//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::config::Environment;

use super::validation::{
    validate_attribute, validate_config_file_path, validate_endpoint_arn, validate_json_object,
    validate_phone_number, validate_platform_arn,
};

/// Send SMS and mobile push notifications through AWS SNS
#[derive(Parser, Debug)]
#[command(name = "sns-channel")]
#[command(about = "Send SMS and mobile push notifications through AWS SNS")]
#[command(long_about = "
sns-channel publishes SMS messages to phone numbers and push notifications to
SNS platform endpoints, and manages platform endpoint registration.

EXAMPLES:
    # Send a transactional SMS
    sns-channel sms --to +15555550100 --message \"Your code is 1234\" --transactional

    # Preview the publish request without contacting SNS
    sns-channel sms --to +15555550100 --message \"Hello\" --dry-run

    # Send a push notification with custom data
    sns-channel push --endpoint arn:aws:sns:us-east-1:123456789012:endpoint/APNS/MyApp/id \\
        --body \"Order shipped\" --title \"Orders\" --badge 1 --data '{\"order_id\": 12345}'

    # Register a device token
    sns-channel register --token DEVICE_TOKEN \\
        --platform-arn arn:aws:sns:us-east-1:123456789012:app/APNS/MyApp

    # Validate configuration
    sns-channel --env production check-config
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered config directory.
    /// Environment variable overrides still apply.
    #[arg(short, long, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{environment}.toml` layer. Defaults to `SNS_APP_ENV`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an SMS to one or more phone numbers
    ///
    /// Delivery type, sender ID and origination number default to the
    /// `[sms]` configuration section.
    Sms(SmsArgs),

    /// Send a push notification to one or more platform endpoints
    Push(PushArgs),

    /// Register a device token with a platform application
    ///
    /// When SNS reports an existing endpoint for the token, that endpoint is
    /// updated and re-enabled and its ARN is returned.
    Register(RegisterArgs),

    /// Update attributes of a platform endpoint
    SetAttributes(SetAttributesArgs),

    /// Validate configuration and print the effective settings
    CheckConfig,
}

#[derive(Args, Debug, Clone)]
pub struct SmsArgs {
    /// Destination phone number in E.164 format, repeatable
    #[arg(long, required = true, value_name = "PHONE", value_parser = validate_phone_number)]
    pub to: Vec<String>,

    /// Message text
    #[arg(short, long)]
    pub message: String,

    /// Send as Transactional instead of the configured default
    #[arg(long)]
    pub transactional: bool,

    /// Sender ID shown to the recipient where supported
    #[arg(long, value_name = "ID")]
    pub sender: Option<String>,

    /// Origination number to send from
    #[arg(long, value_name = "NUMBER")]
    pub origination_number: Option<String>,

    /// Print the publish request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PushArgs {
    /// Platform endpoint ARN, repeatable
    #[arg(long, required = true, value_name = "ARN", value_parser = validate_endpoint_arn)]
    pub endpoint: Vec<String>,

    /// Notification body
    #[arg(short, long)]
    pub body: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    /// Badge count shown on the app icon
    #[arg(long, value_name = "N")]
    pub badge: Option<u32>,

    /// Sound name, `default` when omitted
    #[arg(long)]
    pub sound: Option<String>,

    /// APNs time to live in seconds
    #[arg(long, value_name = "SECS")]
    pub ttl: Option<u64>,

    /// Custom payload data as a JSON object
    #[arg(long, value_name = "JSON", value_parser = validate_json_object)]
    pub data: Option<Map<String, Value>>,

    /// Print the publish request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Device token issued by APNs or FCM
    #[arg(long)]
    pub token: String,

    /// Platform application ARN
    #[arg(long, value_name = "ARN", value_parser = validate_platform_arn)]
    pub platform_arn: String,

    /// Free-form data stored with the endpoint
    #[arg(long, value_name = "DATA")]
    pub custom_user_data: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SetAttributesArgs {
    /// Platform endpoint ARN
    #[arg(long, value_name = "ARN", value_parser = validate_endpoint_arn)]
    pub endpoint_arn: String,

    /// Attribute to set, e.g. `Enabled=true`, repeatable
    #[arg(long, required = true, value_name = "KEY=VALUE", value_parser = validate_attribute)]
    pub attribute: Vec<(String, String)>,
}

impl Cli {
    /// Log level forced by `--verbose` or `--quiet`
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Environment from `--env`, falling back to `SNS_APP_ENV`
    pub fn environment(&self) -> Environment {
        self.env.unwrap_or_else(Environment::from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const ENDPOINT: &str = "arn:aws:sns:us-east-1:123456789012:endpoint/APNS/MyApp/device";

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["sns-channel", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["sns-channel"]).is_err());
    }

    #[test]
    fn test_sms_command() {
        let cli = Cli::try_parse_from([
            "sns-channel",
            "sms",
            "--to",
            "+11111111111",
            "--to",
            "+22222222222",
            "--message",
            "Message text",
            "--transactional",
            "--sender",
            "MyBrand",
        ])
        .unwrap();

        match cli.command {
            Commands::Sms(args) => {
                assert_eq!(args.to, vec!["+11111111111", "+22222222222"]);
                assert_eq!(args.message, "Message text");
                assert!(args.transactional);
                assert_eq!(args.sender.as_deref(), Some("MyBrand"));
                assert!(args.origination_number.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_sms_rejects_invalid_phone() {
        let result =
            Cli::try_parse_from(["sns-channel", "sms", "--to", "5555", "--message", "Hello"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_push_command() {
        let cli = Cli::try_parse_from([
            "sns-channel",
            "push",
            "--endpoint",
            ENDPOINT,
            "--body",
            "Hello World",
            "--badge",
            "5",
            "--ttl",
            "3600",
            "--data",
            r#"{"order_id": 12345}"#,
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Push(args) => {
                assert_eq!(args.endpoint, vec![ENDPOINT]);
                assert_eq!(args.badge, Some(5));
                assert_eq!(args.ttl, Some(3600));
                assert_eq!(args.data.unwrap()["order_id"], 12345);
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_set_attributes_command() {
        let cli = Cli::try_parse_from([
            "sns-channel",
            "set-attributes",
            "--endpoint-arn",
            ENDPOINT,
            "--attribute",
            "Enabled=true",
            "--attribute",
            "CustomUserData=user-42",
        ])
        .unwrap();

        match cli.command {
            Commands::SetAttributes(args) => assert_eq!(
                args.attribute,
                vec![
                    ("Enabled".to_string(), "true".to_string()),
                    ("CustomUserData".to_string(), "user-42".to_string()),
                ]
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["sns-channel", "--env", "prod", "-v", "check-config"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        assert_eq!(cli.log_level_override(), Some("debug"));
        assert_eq!(cli.environment(), Environment::Production);

        let cli = Cli::try_parse_from(["sns-channel", "--quiet", "check-config"]).unwrap();
        assert_eq!(cli.log_level_override(), Some("error"));

        assert!(Cli::try_parse_from(["sns-channel", "-v", "-q", "check-config"]).is_err());
    }
}
