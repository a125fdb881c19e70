use super::{SnsMessage, SnsPushMessage, SnsSmsMessage};

/// Message accepted by the router
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Sms(SnsSmsMessage),
    Push(SnsPushMessage),
    Unified(SnsMessage),
}

impl Message {
    /// True when the message can be delivered to a phone number
    pub fn is_sms(&self) -> bool {
        match self {
            Message::Sms(message) => message.is_sms(),
            Message::Push(message) => message.is_sms(),
            Message::Unified(message) => message.is_sms(),
        }
    }

    /// True when the message can be delivered to a platform endpoint
    pub fn is_push(&self) -> bool {
        match self {
            Message::Sms(message) => message.is_push(),
            Message::Push(message) => message.is_push(),
            Message::Unified(message) => message.is_push(),
        }
    }
}

impl From<SnsSmsMessage> for Message {
    fn from(message: SnsSmsMessage) -> Self {
        Message::Sms(message)
    }
}

impl From<SnsPushMessage> for Message {
    fn from(message: SnsPushMessage) -> Self {
        Message::Push(message)
    }
}

impl From<SnsMessage> for Message {
    fn from(message: SnsMessage) -> Self {
        Message::Unified(message)
    }
}

/// What a notification renders for the SNS channel.
///
/// Plain text is shorthand for a promotional SMS with that body.
#[derive(Debug, Clone, PartialEq)]
pub enum SnsContent {
    Text(String),
    Sms(SnsSmsMessage),
    Push(SnsPushMessage),
    Unified(SnsMessage),
}

impl From<SnsContent> for Message {
    fn from(content: SnsContent) -> Self {
        match content {
            SnsContent::Text(body) => Message::Sms(SnsSmsMessage::new(body)),
            SnsContent::Sms(message) => Message::Sms(message),
            SnsContent::Push(message) => Message::Push(message),
            SnsContent::Unified(message) => Message::Unified(message),
        }
    }
}

impl From<&str> for SnsContent {
    fn from(body: &str) -> Self {
        SnsContent::Text(body.to_string())
    }
}

impl From<String> for SnsContent {
    fn from(body: String) -> Self {
        SnsContent::Text(body)
    }
}

impl From<SnsSmsMessage> for SnsContent {
    fn from(message: SnsSmsMessage) -> Self {
        SnsContent::Sms(message)
    }
}

impl From<SnsPushMessage> for SnsContent {
    fn from(message: SnsPushMessage) -> Self {
        SnsContent::Push(message)
    }
}

impl From<SnsMessage> for SnsContent {
    fn from(message: SnsMessage) -> Self {
        SnsContent::Unified(message)
    }
}
