//! Check-config command handler

use serde_json::{Value, json};

use crate::config::{Environment, Settings};

/// Handler for the `check-config` command
///
/// Settings reach this handler already validated by the loader, so it only
/// summarizes them. Secrets are reported by presence, never by value.
pub struct CheckConfigHandler {
    settings: Settings,
    environment: Environment,
}

impl CheckConfigHandler {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    pub fn execute(&self) -> Value {
        let Settings {
            application,
            aws,
            sms,
            logger,
        } = &self.settings;

        let credentials = if aws.has_static_credentials() {
            "static"
        } else {
            "default-chain"
        };

        json!({
            "status": "ok",
            "environment": self.environment.as_str(),
            "application": {
                "name": application.name,
                "version": application.version,
            },
            "aws": {
                "region": aws.region,
                "endpoint": aws.endpoint,
                "credentials": credentials,
                "session_token": aws.session_token.is_some(),
            },
            "sms": {
                "default_delivery_type": sms.default_delivery_type,
                "sender_id": sms.sender_id,
                "origination_number": sms.origination_number,
            },
            "logger": {
                "level": logger.level,
                "console": logger.console.enabled,
                "file": logger.file.enabled.then_some(&logger.file.path),
            },
        })
    }
}
