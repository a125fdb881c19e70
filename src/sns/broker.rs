//! Broker seam between the router and the SNS client.
//!
//! The request structs serialize to the same shape the SNS API documents
//! (`Message`, `PhoneNumber`, `MessageAttributes`, ...), which keeps them easy
//! to inspect in tests and dry runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Typed message attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttributeValue {
    pub data_type: String,
    pub string_value: String,
}

impl MessageAttributeValue {
    /// Creates a `String` typed attribute
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: "String".to_string(),
            string_value: value.into(),
        }
    }
}

/// Parameters for the SNS `Publish` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_arn: Option<String>,
    pub message_attributes: BTreeMap<String, MessageAttributeValue>,
}

/// Result of a successful publish
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishResponse {
    pub message_id: Option<String>,
}

/// Parameters for the SNS `CreatePlatformEndpoint` action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlatformEndpointRequest {
    pub token: String,
    pub platform_application_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_user_data: Option<String>,
}

/// Result of a successful endpoint registration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlatformEndpointResponse {
    pub endpoint_arn: Option<String>,
}

/// Parameters for the SNS `SetEndpointAttributes` action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetEndpointAttributesRequest {
    pub endpoint_arn: String,
    pub attributes: BTreeMap<String, String>,
}

/// Error reported by the broker for a single call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SNS {operation} failed ({code}): {message}")]
pub struct BrokerError {
    /// SNS action that failed, e.g. `Publish`
    pub operation: String,
    /// SNS error code, e.g. `EndpointDisabled`
    pub code: String,
    /// Human readable message from the broker
    pub message: String,
    /// Request id, when the broker returned one
    pub request_id: Option<String>,
}

impl BrokerError {
    pub fn new(
        operation: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            code: code.into(),
            message: message.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Client for the SNS actions the router needs.
///
/// Uses `async_trait` so the router can hold an `Arc<dyn SnsBroker>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnsBroker: Send + Sync {
    /// Publishes a message to a phone number or target ARN
    async fn publish(&self, request: PublishRequest) -> Result<PublishResponse, BrokerError>;

    /// Registers a device token with a platform application
    async fn create_platform_endpoint(
        &self,
        request: CreatePlatformEndpointRequest,
    ) -> Result<CreatePlatformEndpointResponse, BrokerError>;

    /// Updates attributes of an existing endpoint
    async fn set_endpoint_attributes(
        &self,
        request: SetEndpointAttributesRequest,
    ) -> Result<(), BrokerError>;
}
