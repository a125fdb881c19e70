//! Destination router.
//!
//! Turns messages into SNS publish requests and decides, per destination,
//! whether a unified message goes out as SMS or push.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::broker::{
    CreatePlatformEndpointRequest, CreatePlatformEndpointResponse, MessageAttributeValue,
    PublishRequest, PublishResponse, SetEndpointAttributesRequest, SnsBroker,
};
use super::outcome::{Delivery, Destination, SendOutcome, SoftFailure};
use crate::error::{EndpointArnParser, SnsError, SnsResult};
use crate::messages::{Message, SnsMessage, SnsPushMessage, SnsSmsMessage};

/// Destinations starting with this prefix are platform endpoints
pub const ENDPOINT_ARN_PREFIX: &str = "arn:aws:sns:";

pub const SMS_TYPE_ATTRIBUTE: &str = "AWS.SNS.SMS.SMSType";
pub const SENDER_ID_ATTRIBUTE: &str = "AWS.SNS.SMS.SenderID";
pub const ORIGINATION_NUMBER_ATTRIBUTE: &str = "AWS.MM.SMS.OriginationNumber";

/// Publish error code returned as a soft failure instead of an error
const ENDPOINT_DISABLED: &str = "EndpointDisabled";

/// SNS client wrapper that routes messages to phone numbers and endpoints
///
/// # Example
/// ```ignore
/// let sns = Sns::new(Arc::new(RusotoBroker::from_config(&settings.aws)?));
/// let outcome = sns
///     .send(&SnsSmsMessage::new("Hello").into(), &"+15555550100".into())
///     .await?;
/// ```
#[derive(Clone)]
pub struct Sns {
    broker: Arc<dyn SnsBroker>,
}

impl Sns {
    pub fn new(broker: Arc<dyn SnsBroker>) -> Self {
        Self { broker }
    }

    /// Sends the message to one or more destinations.
    ///
    /// A list is sent one destination at a time, in order, and the outcome
    /// holds one delivery per destination. The first hard error stops the loop.
    ///
    /// # Errors
    /// - `InvalidArgument` when a unified message lacks the child the destination needs
    /// - `Broker` for any broker failure other than a disabled endpoint
    pub async fn send(
        &self,
        message: &Message,
        destination: &Destination,
    ) -> SnsResult<SendOutcome> {
        match destination {
            Destination::One(to) => self.send_one(message, to).await.map(SendOutcome::One),
            Destination::Many(list) => {
                let mut deliveries = Vec::with_capacity(list.len());
                for to in list {
                    deliveries.push(self.send_one(message, to).await?);
                }
                Ok(SendOutcome::Many(deliveries))
            }
        }
    }

    async fn send_one(&self, message: &Message, to: &str) -> SnsResult<Delivery> {
        match message {
            Message::Unified(message) => self.send_unified(message, to).await,
            Message::Sms(message) => self.send_sms(message, to).await.map(Delivery::Published),
            Message::Push(message) => self.send_push(message, to).await,
        }
    }

    async fn send_unified(&self, message: &SnsMessage, to: &str) -> SnsResult<Delivery> {
        if to.starts_with(ENDPOINT_ARN_PREFIX) {
            let push = message.get_push().ok_or_else(|| {
                SnsError::invalid_argument("Push message required to send to endpoint ARN")
            })?;
            return self.send_push(push, to).await;
        }

        let sms = message.get_sms().ok_or_else(|| {
            SnsError::invalid_argument("SMS message required to send to phone number")
        })?;
        self.send_sms(sms, to).await.map(Delivery::Published)
    }

    /// Sends an SMS to an E.164 phone number
    pub async fn send_sms(
        &self,
        message: &SnsSmsMessage,
        phone_number: &str,
    ) -> SnsResult<PublishResponse> {
        let request = Self::build_sms_request(message, phone_number);
        debug!(
            phone_number = %phone_number,
            sms_type = %message.get_delivery_type(),
            "Publishing SMS"
        );

        Ok(self.broker.publish(request).await?)
    }

    /// Sends a push notification to a platform endpoint.
    ///
    /// A disabled endpoint is reported as `Delivery::EndpointDisabled`
    /// rather than an error.
    pub async fn send_push(
        &self,
        message: &SnsPushMessage,
        endpoint_arn: &str,
    ) -> SnsResult<Delivery> {
        let request = Self::build_push_request(message, endpoint_arn)?;
        debug!(endpoint_arn = %endpoint_arn, "Publishing push notification");

        match self.broker.publish(request).await {
            Ok(response) => Ok(Delivery::Published(response)),
            Err(err) if err.code == ENDPOINT_DISABLED => {
                warn!(
                    endpoint_arn = %endpoint_arn,
                    request_id = ?err.request_id,
                    "Push endpoint is disabled"
                );
                Ok(Delivery::EndpointDisabled(SoftFailure {
                    error: err.code,
                    message: err.message,
                    request_id: err.request_id,
                    endpoint: endpoint_arn.to_string(),
                }))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Builds the publish parameters for an SMS.
    ///
    /// Sender ID and origination number attributes are only added when set
    /// and non-empty.
    pub fn build_sms_request(message: &SnsSmsMessage, phone_number: &str) -> PublishRequest {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            SMS_TYPE_ATTRIBUTE.to_string(),
            MessageAttributeValue::string(message.get_delivery_type().as_str()),
        );

        if let Some(sender) = message.get_sender().filter(|s| !s.is_empty()) {
            attributes.insert(
                SENDER_ID_ATTRIBUTE.to_string(),
                MessageAttributeValue::string(sender),
            );
        }

        if let Some(number) = message.get_origination_number().filter(|n| !n.is_empty()) {
            attributes.insert(
                ORIGINATION_NUMBER_ATTRIBUTE.to_string(),
                MessageAttributeValue::string(number),
            );
        }

        PublishRequest {
            message: message.get_body().to_string(),
            phone_number: Some(phone_number.to_string()),
            message_attributes: attributes,
            ..Default::default()
        }
    }

    /// Builds the publish parameters for a push notification
    pub fn build_push_request(
        message: &SnsPushMessage,
        endpoint_arn: &str,
    ) -> SnsResult<PublishRequest> {
        Ok(PublishRequest {
            message: message.build_payload()?,
            message_structure: Some("json".to_string()),
            target_arn: Some(endpoint_arn.to_string()),
            message_attributes: message.build_message_attributes(),
            ..Default::default()
        })
    }

    /// Registers a device token with a platform application
    pub async fn create_platform_endpoint(
        &self,
        token: &str,
        platform_arn: &str,
        custom_user_data: Option<&str>,
    ) -> SnsResult<CreatePlatformEndpointResponse> {
        let request = CreatePlatformEndpointRequest {
            token: token.to_string(),
            platform_application_arn: platform_arn.to_string(),
            custom_user_data: custom_user_data.map(str::to_string),
        };

        Ok(self.broker.create_platform_endpoint(request).await?)
    }

    /// Updates the attributes of an existing endpoint
    pub async fn set_endpoint_attributes(
        &self,
        endpoint_arn: &str,
        attributes: BTreeMap<String, String>,
    ) -> SnsResult<()> {
        let request = SetEndpointAttributesRequest {
            endpoint_arn: endpoint_arn.to_string(),
            attributes,
        };

        Ok(self.broker.set_endpoint_attributes(request).await?)
    }

    /// Registers a device token, reusing the endpoint that already owns it.
    ///
    /// When SNS reports that the token is registered to another endpoint,
    /// that endpoint is re-enabled with the given token and user data and
    /// its ARN is returned.
    ///
    /// # Returns
    /// The endpoint ARN, or None if the broker did not return one
    pub async fn register_endpoint(
        &self,
        token: &str,
        platform_arn: &str,
        custom_user_data: Option<&str>,
    ) -> SnsResult<Option<String>> {
        let err = match self
            .create_platform_endpoint(token, platform_arn, custom_user_data)
            .await
        {
            Ok(response) => return Ok(response.endpoint_arn),
            Err(err) => err,
        };

        let existing = match &err {
            SnsError::Broker(broker_err) => {
                EndpointArnParser::existing_endpoint(&broker_err.message)
            }
            _ => None,
        };

        let Some(endpoint_arn) = existing else {
            return Err(err);
        };

        info!(endpoint_arn = %endpoint_arn, "Endpoint already exists for token, updating it");

        let attributes = BTreeMap::from([
            ("Token".to_string(), token.to_string()),
            (
                "CustomUserData".to_string(),
                custom_user_data.unwrap_or_default().to_string(),
            ),
            ("Enabled".to_string(), "True".to_string()),
        ]);
        self.set_endpoint_attributes(&endpoint_arn, attributes).await?;

        Ok(Some(endpoint_arn))
    }
}
