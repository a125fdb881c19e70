use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// SMS delivery type understood by the `AWS.SNS.SMS.SMSType` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmsDeliveryType {
    /// Non-critical messages, optimized for cost
    Promotional,
    /// Critical messages, optimized for reliability
    Transactional,
}

impl SmsDeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsDeliveryType::Promotional => "Promotional",
            SmsDeliveryType::Transactional => "Transactional",
        }
    }
}

impl Default for SmsDeliveryType {
    fn default() -> Self {
        SmsDeliveryType::Promotional
    }
}

impl FromStr for SmsDeliveryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "promotional" => Ok(SmsDeliveryType::Promotional),
            "transactional" => Ok(SmsDeliveryType::Transactional),
            _ => Err(format!(
                "Invalid SMS delivery type '{}'. Valid values are: Promotional, Transactional",
                s
            )),
        }
    }
}

impl std::fmt::Display for SmsDeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text message sent to an E.164 phone number
///
/// # Example
/// ```ignore
/// let message = SnsSmsMessage::new("Your code is 1234")
///     .transactional()
///     .sender("MyApp");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnsSmsMessage {
    body: String,
    delivery_type: SmsDeliveryType,
    sender: Option<String>,
    origination_number: Option<String>,
}

impl SnsSmsMessage {
    /// Creates a message with the given body
    pub fn new(body: impl AsRef<str>) -> Self {
        Self::create().body(body)
    }

    /// Creates an empty promotional message
    pub fn create() -> Self {
        Self::default()
    }

    /// Creates a message from a map whose keys match the setter names.
    ///
    /// Recognized keys are `body`, `transactional`, `promotional`, `sender`
    /// and `originationNumber` (or `origination_number`). Unknown keys and
    /// values of the wrong type are skipped.
    pub fn from_options(options: &Map<String, Value>) -> Self {
        let mut message = Self::create();

        for (key, value) in options {
            message = match (key.as_str(), value) {
                ("body", Value::String(body)) => message.body(body.as_str()),
                ("transactional", Value::Bool(true)) => message.transactional(),
                ("transactional", Value::Bool(false)) => message.promotional(),
                ("promotional", Value::Bool(true)) => message.promotional(),
                ("promotional", Value::Bool(false)) => message.transactional(),
                ("sender", Value::String(sender)) => message.sender(sender.as_str()),
                ("originationNumber" | "origination_number", Value::String(number)) => {
                    message.origination_number(number.as_str())
                }
                _ => {
                    tracing::trace!(key = %key, "Ignoring SMS message option");
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

    /// Marks the message as transactional
    pub fn transactional(mut self) -> Self {
        self.delivery_type = SmsDeliveryType::Transactional;
        self
    }

    /// Marks the message as promotional
    pub fn promotional(mut self) -> Self {
        self.delivery_type = SmsDeliveryType::Promotional;
        self
    }

    /// Sets the delivery type directly
    pub fn delivery_type(mut self, delivery_type: SmsDeliveryType) -> Self {
        self.delivery_type = delivery_type;
        self
    }

    /// Sets the sender ID shown on the recipient's device
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the long code or short code the message is sent from
    pub fn origination_number(mut self, number: impl Into<String>) -> Self {
        self.origination_number = Some(number.into());
        self
    }

    pub fn get_body(&self) -> &str {
        &self.body
    }

    pub fn get_delivery_type(&self) -> SmsDeliveryType {
        self.delivery_type
    }

    pub fn get_sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn get_origination_number(&self) -> Option<&str> {
        self.origination_number.as_deref()
    }

    pub fn is_sms(&self) -> bool {
        true
    }

    pub fn is_push(&self) -> bool {
        false
    }
}

impl From<&str> for SnsSmsMessage {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

impl From<String> for SnsSmsMessage {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}
