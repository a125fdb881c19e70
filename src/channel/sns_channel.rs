use std::sync::Arc;

use super::{EventDispatcher, Notifiable, Notification, NotificationFailed};
use crate::error::{CouldNotSendNotification, SnsResult};
use crate::messages::Message;
use crate::sns::{Delivery, Destination, Sns};

/// Name the channel routes and reports under
pub const CHANNEL_NAME: &str = "sns";

/// Recipient attributes tried, in order, for SMS
pub const PHONE_ATTRIBUTES: [&str; 3] = ["phone", "phone_number", "full_phone"];

/// Recipient attributes tried, in order, for push
pub const ENDPOINT_ATTRIBUTES: [&str; 5] = [
    "sns_endpoint_arn",
    "endpoint_arn",
    "endpoint",
    "device_endpoint",
    "push_endpoint",
];

/// Delivers notifications through the SNS router
#[derive(Clone)]
pub struct SnsChannel {
    sns: Sns,
    events: Arc<dyn EventDispatcher>,
}

impl SnsChannel {
    pub fn new(sns: Sns, events: Arc<dyn EventDispatcher>) -> Self {
        Self { sns, events }
    }

    /// Sends the notification to the recipient.
    ///
    /// Never fails: any error is dispatched as a `NotificationFailed` event
    /// and `None` is returned. For several destinations only the last
    /// delivery is returned.
    pub async fn send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Option<Delivery> {
        match self.try_send(notifiable, notification).await {
            Ok(delivery) => delivery,
            Err(error) => {
                self.events.dispatch(NotificationFailed {
                    notifiable,
                    notification,
                    channel: CHANNEL_NAME,
                    message: error.to_string(),
                    error,
                });
                None
            }
        }
    }

    async fn try_send(
        &self,
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> SnsResult<Option<Delivery>> {
        let message = Self::message(notifiable, notification)?;
        let destination = Self::destination(notifiable, notification, &message)?;

        let outcome = self.sns.send(&message, &destination).await?;
        Ok(outcome.into_last())
    }

    fn message(
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
    ) -> Result<Message, CouldNotSendNotification> {
        notification
            .to_sns(notifiable)
            .map(Message::from)
            .ok_or(CouldNotSendNotification::InvalidMessageObject)
    }

    /// Explicit route first, then the well-known attributes
    fn destination(
        notifiable: &dyn Notifiable,
        notification: &dyn Notification,
        message: &Message,
    ) -> Result<Destination, CouldNotSendNotification> {
        if let Some(to) = notifiable
            .route_notification_for(CHANNEL_NAME, notification)
            .filter(|to| !to.is_empty())
        {
            return Ok(to);
        }

        Self::guess_destination(notifiable, message)
    }

    fn guess_destination(
        notifiable: &dyn Notifiable,
        message: &Message,
    ) -> Result<Destination, CouldNotSendNotification> {
        let mut found = Vec::with_capacity(2);
        if message.is_sms() {
            found.extend(Self::first_attribute(notifiable, &PHONE_ATTRIBUTES));
        }
        if message.is_push() {
            found.extend(Self::first_attribute(notifiable, &ENDPOINT_ATTRIBUTES));
        }

        match found.len() {
            0 => Err(CouldNotSendNotification::InvalidReceiver),
            1 => Ok(Destination::One(found.remove(0))),
            _ => Ok(Destination::Many(found)),
        }
    }

    fn first_attribute(notifiable: &dyn Notifiable, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| notifiable.attribute(name))
            .find(|value| !value.is_empty())
    }
}
