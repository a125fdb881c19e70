//! SNS message builders.
//!
//! Three value objects describe what gets published:
//! - [`SnsSmsMessage`] for text messages sent to a phone number
//! - [`SnsPushMessage`] for mobile push sent to a platform endpoint
//! - [`SnsMessage`] holding both, so one notification can be routed per destination
//!
//! [`Message`] is the closed set the router accepts and [`SnsContent`] is what a
//! notification hands to the channel (the same set plus plain text).

mod content;
mod push;
mod sms;
mod unified;

pub use content::{Message, SnsContent};
pub use push::SnsPushMessage;
pub use sms::{SmsDeliveryType, SnsSmsMessage};
pub use unified::SnsMessage;
