//! Endpoint command handler
//!
//! Registers device tokens and updates platform endpoint attributes.

use anyhow::Context;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::info;

use crate::cli::parser::{RegisterArgs, SetAttributesArgs};
use crate::sns::Sns;

/// Handler for the `register` and `set-attributes` commands
pub struct EndpointCommandHandler {
    sns: Sns,
}

impl EndpointCommandHandler {
    pub fn new(sns: Sns) -> Self {
        Self { sns }
    }

    /// Register a device token and report the endpoint ARN
    pub async fn register(&self, args: &RegisterArgs) -> anyhow::Result<Value> {
        let endpoint_arn = self
            .sns
            .register_endpoint(
                &args.token,
                &args.platform_arn,
                args.custom_user_data.as_deref(),
            )
            .await
            .context("Failed to register platform endpoint")?;

        info!(endpoint_arn = ?endpoint_arn, "Platform endpoint registered");
        Ok(json!({ "endpoint_arn": endpoint_arn }))
    }

    /// Set endpoint attributes. A repeated key keeps its last value.
    pub async fn set_attributes(&self, args: &SetAttributesArgs) -> anyhow::Result<Value> {
        let attributes: BTreeMap<String, String> = args.attribute.iter().cloned().collect();
        let updated: Vec<String> = attributes.keys().cloned().collect();

        self.sns
            .set_endpoint_attributes(&args.endpoint_arn, attributes)
            .await
            .with_context(|| format!("Failed to update endpoint {}", args.endpoint_arn))?;

        Ok(json!({
            "endpoint_arn": args.endpoint_arn,
            "updated": updated,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sns::{BrokerError, CreatePlatformEndpointResponse, MockSnsBroker};
    use std::sync::Arc;

    const PLATFORM: &str = "arn:aws:sns:us-east-1:123456789012:app/APNS/MyApp";
    const ENDPOINT: &str = "arn:aws:sns:us-east-1:123456789012:endpoint/APNS/MyApp/device";

    fn handler(broker: MockSnsBroker) -> EndpointCommandHandler {
        EndpointCommandHandler::new(Sns::new(Arc::new(broker)))
    }

    #[tokio::test]
    async fn test_register_returns_new_endpoint() {
        let mut broker = MockSnsBroker::new();
        broker
            .expect_create_platform_endpoint()
            .withf(|request| {
                request.token == "token-1"
                    && request.platform_application_arn == PLATFORM
                    && request.custom_user_data.as_deref() == Some("user-42")
            })
            .times(1)
            .returning(|_| {
                Ok(CreatePlatformEndpointResponse {
                    endpoint_arn: Some(ENDPOINT.to_string()),
                })
            });

        let args = RegisterArgs {
            token: "token-1".to_string(),
            platform_arn: PLATFORM.to_string(),
            custom_user_data: Some("user-42".to_string()),
        };

        let result = handler(broker).register(&args).await.unwrap();
        assert_eq!(result, json!({ "endpoint_arn": ENDPOINT }));
    }

    #[tokio::test]
    async fn test_set_attributes_last_value_wins() {
        let mut broker = MockSnsBroker::new();
        broker
            .expect_set_endpoint_attributes()
            .withf(|request| {
                request.endpoint_arn == ENDPOINT
                    && request.attributes
                        == BTreeMap::from([
                            ("CustomUserData".to_string(), "b".to_string()),
                            ("Enabled".to_string(), "true".to_string()),
                        ])
            })
            .times(1)
            .returning(|_| Ok(()));

        let args = SetAttributesArgs {
            endpoint_arn: ENDPOINT.to_string(),
            attribute: vec![
                ("Enabled".to_string(), "true".to_string()),
                ("CustomUserData".to_string(), "a".to_string()),
                ("CustomUserData".to_string(), "b".to_string()),
            ],
        };

        let result = handler(broker).set_attributes(&args).await.unwrap();
        assert_eq!(result["updated"], json!(["CustomUserData", "Enabled"]));
    }

    #[tokio::test]
    async fn test_set_attributes_error_has_context() {
        let mut broker = MockSnsBroker::new();
        broker.expect_set_endpoint_attributes().returning(|_| {
            Err(BrokerError::new("SetEndpointAttributes", "NotFound", "Endpoint does not exist"))
        });

        let args = SetAttributesArgs {
            endpoint_arn: ENDPOINT.to_string(),
            attribute: vec![("Enabled".to_string(), "false".to_string())],
        };

        let err = handler(broker).set_attributes(&args).await.unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to update endpoint"));
        assert!(chain.contains("Endpoint does not exist"));
    }
}
