//! Deployment environment selecting which config files are layered
//!
//! Each environment names one optional `{environment}.toml` layer. The same
//! type backs the `--env` flag, so aliases such as `prod` work everywhere.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local work against an SNS emulator (`development.toml`)
    #[default]
    #[value(alias = "dev")]
    Development,
    /// Automated test runs (`test.toml`)
    Test,
    /// Pre-production AWS account (`staging.toml`)
    #[value(alias = "stage")]
    Staging,
    /// Live AWS account (`production.toml`)
    #[value(alias = "prod")]
    Production,
}

impl Environment {
    /// Environment variable selecting the environment
    pub const ENV_VAR: &'static str = "SNS_APP_ENV";

    /// Reads `SNS_APP_ENV`, falling back to `Development` when unset or invalid
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// File name of this environment's config layer
    pub fn layer_file(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    /// Accepts the names and aliases `--env` accepts, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true).map_err(|_| {
            let names: Vec<&str> = Self::value_variants().iter().map(Self::as_str).collect();
            ConfigError::EnvVar(format!(
                "Invalid environment '{}'. Valid values are: {}",
                s,
                names.join(", ")
            ))
        })
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
