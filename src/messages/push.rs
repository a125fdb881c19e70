use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use crate::sns::MessageAttributeValue;

/// Message attribute carrying the APNS time-to-live
pub const APNS_TTL_ATTRIBUTE: &str = "AWS.SNS.MOBILE.APNS.TTL";

/// Mobile push message published to a platform endpoint.
///
/// One message produces a payload for every platform family SNS fans out to:
/// APNS (and its sandbox) for iOS and GCM/FCM for Android.
///
/// # Example
/// ```ignore
/// let message = SnsPushMessage::new("Your order has shipped")
///     .title("Order update")
///     .badge(1)
///     .data(json!({"order_id": 12345}).as_object().cloned().unwrap_or_default());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SnsPushMessage {
    body: String,
    title: String,
    subtitle: String,
    badge: u32,
    sound: String,
    ttl: Option<u64>,
    data: Map<String, Value>,
}

impl Default for SnsPushMessage {
    fn default() -> Self {
        Self {
            body: String::new(),
            title: String::new(),
            subtitle: String::new(),
            badge: 0,
            sound: "default".to_string(),
            ttl: None,
            data: Map::new(),
        }
    }
}

impl SnsPushMessage {
    /// Creates a message with the given body
    pub fn new(body: impl AsRef<str>) -> Self {
        Self::create().body(body)
    }

    /// Creates an empty message with the default sound
    pub fn create() -> Self {
        Self::default()
    }

    /// Creates a message from a map whose keys match the setter names.
    ///
    /// Recognized keys are `body`, `title`, `subtitle`, `badge`, `sound`,
    /// `ttl` and `data`. Unknown keys and values of the wrong type are skipped.
    pub fn from_options(options: &Map<String, Value>) -> Self {
        let mut message = Self::create();

        for (key, value) in options {
            message = match (key.as_str(), value) {
                ("body", Value::String(body)) => message.body(body),
                ("title", Value::String(title)) => message.title(title),
                ("subtitle", Value::String(subtitle)) => message.subtitle(subtitle),
                ("badge", Value::Number(badge)) => match badge.as_u64().and_then(|b| u32::try_from(b).ok()) {
                    Some(badge) => message.badge(badge),
                    None => message,
                },
                ("sound", Value::String(sound)) => message.sound(sound.as_str()),
                ("ttl", Value::Number(ttl)) => match ttl.as_u64() {
                    Some(ttl) => message.ttl(Some(ttl)),
                    None => message,
                },
                ("ttl", Value::Null) => message.ttl(None),
                ("data", Value::Object(data)) => message.data(data.clone()),
                _ => {
                    tracing::trace!(key = %key, "Ignoring push message option");
                    message
                }
            };
        }

        message
    }

    /// Sets the message body (surrounding whitespace is trimmed)
    pub fn body(mut self, content: impl AsRef<str>) -> Self {
        self.body = content.as_ref().trim().to_string();
        self
    }

    /// Sets the notification title (surrounding whitespace is trimmed)
    pub fn title(mut self, title: impl AsRef<str>) -> Self {
        self.title = title.as_ref().trim().to_string();
        self
    }

    /// Sets the notification subtitle (surrounding whitespace is trimmed)
    pub fn subtitle(mut self, subtitle: impl AsRef<str>) -> Self {
        self.subtitle = subtitle.as_ref().trim().to_string();
        self
    }

    /// Sets the app icon badge count
    pub fn badge(mut self, badge: u32) -> Self {
        self.badge = badge;
        self
    }

    /// Sets the sound file name
    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    /// Sets the APNS time-to-live in seconds
    pub fn ttl(mut self, ttl: Option<u64>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the custom data delivered alongside the notification
    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn get_body(&self) -> &str {
        &self.body
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn get_badge(&self) -> u32 {
        self.badge
    }

    pub fn get_sound(&self) -> &str {
        &self.sound
    }

    pub fn get_ttl(&self) -> Option<u64> {
        self.ttl
    }

    pub fn get_data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Builds the APNS payload.
    ///
    /// Custom data is merged at the top level next to `aps`.
    pub fn build_apns_payload(&self) -> Value {
        let mut alert = Map::new();
        alert.insert("body".to_string(), json!(self.body));

        if !self.title.is_empty() {
            alert.insert("title".to_string(), json!(self.title));
        }

        if !self.subtitle.is_empty() {
            alert.insert("subtitle".to_string(), json!(self.subtitle));
        }

        let mut payload = Map::new();
        payload.insert(
            "aps".to_string(),
            json!({
                "alert": alert,
                "sound": self.sound,
                "badge": self.badge,
            }),
        );

        for (key, value) in &self.data {
            payload.insert(key.clone(), value.clone());
        }

        Value::Object(payload)
    }

    /// Builds the GCM/FCM payload.
    ///
    /// Custom data goes under its own `data` key.
    pub fn build_gcm_payload(&self) -> Value {
        let mut payload = json!({
            "notification": {
                "title": self.title,
                "body": self.body,
            }
        });

        if !self.data.is_empty() {
            payload["data"] = Value::Object(self.data.clone());
        }

        payload
    }

    /// Builds the complete SNS message for `MessageStructure: json`.
    ///
    /// # Returns
    /// JSON string with `default`, `APNS`, `APNS_SANDBOX` and `GCM` keys, where
    /// each platform value is itself a serialized JSON document
    pub fn build_payload(&self) -> Result<String, serde_json::Error> {
        let apns = serde_json::to_string(&self.build_apns_payload())?;
        let gcm = serde_json::to_string(&self.build_gcm_payload())?;

        serde_json::to_string(&json!({
            "default": self.body,
            "APNS": apns,
            "APNS_SANDBOX": apns,
            "GCM": gcm,
        }))
    }

    /// Builds the message attributes for the publish request
    ///
    /// # Returns
    /// Empty map unless a TTL is set
    pub fn build_message_attributes(&self) -> BTreeMap<String, MessageAttributeValue> {
        let mut attributes = BTreeMap::new();

        if let Some(ttl) = self.ttl {
            attributes.insert(
                APNS_TTL_ATTRIBUTE.to_string(),
                MessageAttributeValue::string(ttl.to_string()),
            );
        }

        attributes
    }

    pub fn is_sms(&self) -> bool {
        false
    }

    pub fn is_push(&self) -> bool {
        true
    }
}

impl From<&str> for SnsPushMessage {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

impl From<String> for SnsPushMessage {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}
