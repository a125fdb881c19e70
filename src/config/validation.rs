//! Configuration validation logic
//!
//! Checks that loaded values are usable before any client or logger is
//! built from them.

use crate::config::error::ConfigError;
use crate::config::settings::{AwsConfig, FileSettings, LoggerSettings, Settings, SmsConfig};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl AwsConfig {
    /// Validate AWS configuration
    ///
    /// # Validation Rules
    /// - Region must not be empty
    /// - A custom endpoint must be an http(s) URL
    /// - Access key id and secret access key are set together
    /// - A session token needs both keys
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::validation(
                "aws.region",
                "Region is required, e.g. us-east-1.",
            ));
        }

        if let Some(endpoint) = &self.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ConfigError::validation(
                "aws.endpoint",
                format!("Endpoint must be an http(s) URL, got '{}'.", endpoint),
            ));
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(ConfigError::validation(
                "aws.access_key_id",
                "access_key_id and secret_access_key must be set together.",
            ));
        }

        if self.session_token.is_some() && !self.has_static_credentials() {
            return Err(ConfigError::validation(
                "aws.session_token",
                "session_token requires access_key_id and secret_access_key.",
            ));
        }

        Ok(())
    }
}

impl SmsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delivery_type()?;

        if let Some(sender) = &self.sender_id
            && sender.trim().is_empty()
        {
            return Err(ConfigError::validation(
                "sms.sender_id",
                "Sender ID cannot be blank. Remove it to send without one.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error
    /// - At least one output is enabled
    /// - File settings are valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validates every section, reporting the first failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aws.validate()?;
        self.sms.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
