//! Send command handler
//!
//! Builds SMS and push messages from command arguments and publishes them
//! through the router, or previews the publish requests on a dry run.

use anyhow::Context;
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::parser::{PushArgs, SmsArgs};
use crate::config::SmsConfig;
use crate::messages::{Message, SnsPushMessage, SnsSmsMessage};
use crate::sns::{Delivery, Destination, SendOutcome, Sns};

/// Handler for the `sms` and `push` commands
pub struct SendCommandHandler {
    sns: Sns,
}

impl SendCommandHandler {
    pub fn new(sns: Sns) -> Self {
        Self { sns }
    }

    /// Publish a message to every destination.
    ///
    /// The JSON result mirrors the destination list: a single delivery for one
    /// destination, an array otherwise.
    pub async fn send(&self, message: Message, destinations: &[String]) -> anyhow::Result<Value> {
        let destination = destination_of(destinations);
        info!(
            destinations = destinations.len(),
            sms = message.is_sms(),
            push = message.is_push(),
            "Publishing message"
        );

        let outcome = self
            .sns
            .send(&message, &destination)
            .await
            .context("Failed to publish message")?;

        let disabled = disabled_endpoints(&outcome);
        if disabled > 0 {
            warn!(disabled, "Some endpoints are disabled and were skipped");
        }

        Ok(serde_json::to_value(outcome)?)
    }
}

/// Builds the SMS for `args`, starting from the `[sms]` defaults
pub fn sms_message(args: &SmsArgs, defaults: &SmsConfig) -> anyhow::Result<SnsSmsMessage> {
    let mut message = defaults.message(&args.message)?;

    if args.transactional {
        message = message.transactional();
    }
    if let Some(sender) = &args.sender {
        message = message.sender(sender.clone());
    }
    if let Some(number) = &args.origination_number {
        message = message.origination_number(number.clone());
    }

    Ok(message)
}

/// Builds the push message for `args`
pub fn push_message(args: &PushArgs) -> SnsPushMessage {
    let mut message = SnsPushMessage::new(&args.body).ttl(args.ttl);

    if let Some(title) = &args.title {
        message = message.title(title);
    }
    if let Some(subtitle) = &args.subtitle {
        message = message.subtitle(subtitle);
    }
    if let Some(badge) = args.badge {
        message = message.badge(badge);
    }
    if let Some(sound) = &args.sound {
        message = message.sound(sound.clone());
    }
    if let Some(data) = &args.data {
        message = message.data(data.clone());
    }

    message
}

/// Publish requests an SMS would produce, without sending anything
pub fn preview_sms(message: &SnsSmsMessage, destinations: &[String]) -> anyhow::Result<Value> {
    let requests = destinations
        .iter()
        .map(|to| Sns::build_sms_request(message, to))
        .collect::<Vec<_>>();
    shape(serde_json::to_value(requests)?)
}

/// Publish requests a push message would produce, without sending anything
pub fn preview_push(message: &SnsPushMessage, destinations: &[String]) -> anyhow::Result<Value> {
    let requests = destinations
        .iter()
        .map(|arn| Sns::build_push_request(message, arn))
        .collect::<Result<Vec<_>, _>>()?;
    shape(serde_json::to_value(requests)?)
}

/// Number of deliveries that hit a disabled endpoint
fn disabled_endpoints(outcome: &SendOutcome) -> usize {
    let deliveries: &[Delivery] = match outcome {
        SendOutcome::One(delivery) => std::slice::from_ref(delivery),
        SendOutcome::Many(deliveries) => deliveries,
    };
    deliveries.iter().filter(|d| !d.is_published()).count()
}

fn destination_of(destinations: &[String]) -> Destination {
    match destinations {
        [one] => Destination::One(one.clone()),
        many => Destination::Many(many.to_vec()),
    }
}

fn shape(requests: Value) -> anyhow::Result<Value> {
    match requests {
        Value::Array(mut list) if list.len() == 1 => Ok(list.remove(0)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sns::{BrokerError, MockSnsBroker, PublishResponse, SoftFailure};
    use std::sync::Arc;

    const ENDPOINT: &str = "arn:aws:sns:us-east-1:123456789012:endpoint/GCM/MyApp/device";

    fn sms_args() -> SmsArgs {
        SmsArgs {
            to: vec!["+15555550100".to_string()],
            message: "  Your code is 1234 ".to_string(),
            transactional: false,
            sender: None,
            origination_number: None,
            dry_run: false,
        }
    }

    fn push_args() -> PushArgs {
        PushArgs {
            endpoint: vec![ENDPOINT.to_string()],
            body: "Order shipped".to_string(),
            title: Some("Orders".to_string()),
            subtitle: None,
            badge: Some(2),
            sound: None,
            ttl: None,
            data: None,
            dry_run: true,
        }
    }

    #[test]
    fn test_sms_message_uses_config_defaults() {
        let defaults = SmsConfig {
            default_delivery_type: "Transactional".to_string(),
            sender_id: Some("MyBrand".to_string()),
            origination_number: None,
        };

        let message = sms_message(&sms_args(), &defaults).unwrap();

        assert_eq!(message.get_body(), "Your code is 1234");
        assert_eq!(message.get_delivery_type().as_str(), "Transactional");
        assert_eq!(message.get_sender(), Some("MyBrand"));
    }

    #[test]
    fn test_sms_arguments_override_defaults() {
        let args = SmsArgs {
            transactional: true,
            sender: Some("Other".to_string()),
            origination_number: Some("+13347814073".to_string()),
            ..sms_args()
        };

        let message = sms_message(&args, &SmsConfig::default()).unwrap();

        assert_eq!(message.get_delivery_type().as_str(), "Transactional");
        assert_eq!(message.get_sender(), Some("Other"));
        assert_eq!(message.get_origination_number(), Some("+13347814073"));
    }

    #[test]
    fn test_push_message_from_args() {
        let message = push_message(&push_args());

        assert_eq!(message.get_body(), "Order shipped");
        assert_eq!(message.get_title(), "Orders");
        assert_eq!(message.get_badge(), 2);
        assert_eq!(message.get_sound(), "default");
    }

    #[test]
    fn test_preview_shape_follows_destinations() {
        let message = SnsSmsMessage::new("Hello");

        let one = preview_sms(&message, &["+15555550100".to_string()]).unwrap();
        assert_eq!(one["PhoneNumber"], "+15555550100");

        let many = preview_sms(
            &message,
            &["+15555550100".to_string(), "+15555550101".to_string()],
        )
        .unwrap();
        assert_eq!(many.as_array().map(Vec::len), Some(2));

        let push = preview_push(&push_message(&push_args()), &[ENDPOINT.to_string()]).unwrap();
        assert_eq!(push["TargetArn"], ENDPOINT);
        assert_eq!(push["MessageStructure"], "json");
    }

    #[tokio::test]
    async fn test_send_returns_deliveries() {
        let mut broker = MockSnsBroker::new();
        broker.expect_publish().times(2).returning(|_| {
            Ok(PublishResponse {
                message_id: Some("msg-1".to_string()),
            })
        });
        let handler = SendCommandHandler::new(Sns::new(Arc::new(broker)));

        let result = handler
            .send(
                SnsSmsMessage::new("Hi").into(),
                &["+15555550100".to_string(), "+15555550101".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(
            result,
            serde_json::json!([{"MessageId": "msg-1"}, {"MessageId": "msg-1"}])
        );
    }

    #[test]
    fn test_disabled_endpoints_are_counted() {
        let published = Delivery::Published(PublishResponse::default());
        let disabled = Delivery::EndpointDisabled(SoftFailure {
            error: "EndpointDisabled".to_string(),
            message: "Endpoint is disabled".to_string(),
            request_id: None,
            endpoint: ENDPOINT.to_string(),
        });

        assert_eq!(disabled_endpoints(&SendOutcome::One(published.clone())), 0);
        assert_eq!(disabled_endpoints(&SendOutcome::One(disabled.clone())), 1);
        assert_eq!(
            disabled_endpoints(&SendOutcome::Many(vec![disabled.clone(), published, disabled])),
            2
        );
    }

    #[tokio::test]
    async fn test_send_propagates_broker_errors() {
        let mut broker = MockSnsBroker::new();
        broker
            .expect_publish()
            .returning(|_| Err(BrokerError::new("Publish", "Throttling", "Rate exceeded")));
        let handler = SendCommandHandler::new(Sns::new(Arc::new(broker)));

        let err = handler
            .send(SnsSmsMessage::new("Hi").into(), &["+15555550100".to_string()])
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Rate exceeded"));
    }
}
