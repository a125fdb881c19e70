//! CLI argument validation functions
//!
//! Value parsers for arguments clap cannot check on its own.

use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

use crate::sns::ENDPOINT_ARN_PREFIX;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate an E.164 phone number: `+`, then 2 to 15 digits, no leading zero
pub fn validate_phone_number(phone: &str) -> Result<String, String> {
    let phone = phone.trim();
    let digits = phone
        .strip_prefix('+')
        .ok_or_else(|| format!("Phone number must start with '+', got: '{}'", phone))?;

    if !(2..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "Phone number must have 2 to 15 digits after '+', got: '{}'",
            phone
        ));
    }

    if digits.starts_with('0') {
        return Err(format!("Country code cannot start with 0, got: '{}'", phone));
    }

    Ok(phone.to_string())
}

/// Validate a platform endpoint ARN
pub fn validate_endpoint_arn(arn: &str) -> Result<String, String> {
    let arn = arn.trim();
    if !arn.starts_with(ENDPOINT_ARN_PREFIX) || !arn.contains(":endpoint/") {
        return Err(format!(
            "Expected an endpoint ARN like arn:aws:sns:<region>:<account>:endpoint/<platform>/<app>/<id>, got: '{}'",
            arn
        ));
    }
    Ok(arn.to_string())
}

/// Validate a platform application ARN
pub fn validate_platform_arn(arn: &str) -> Result<String, String> {
    let arn = arn.trim();
    if !arn.starts_with(ENDPOINT_ARN_PREFIX) || !arn.contains(":app/") {
        return Err(format!(
            "Expected a platform application ARN like arn:aws:sns:<region>:<account>:app/<platform>/<app>, got: '{}'",
            arn
        ));
    }
    Ok(arn.to_string())
}

/// Parse a `KEY=VALUE` endpoint attribute
pub fn validate_attribute(pair: &str) -> Result<(String, String), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("Attribute must be KEY=VALUE, got: '{}'", pair))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Attribute name cannot be empty, got: '{}'", pair));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Parse custom push data, which must be a JSON object
pub fn validate_json_object(json: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("Push data must be a JSON object".to_string()),
        Err(e) => Err(format!("Invalid JSON: {}", e)),
    }
}
