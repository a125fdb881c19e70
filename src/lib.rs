//! sns-channel library
//!
//! Delivers notifications through AWS SNS: SMS to phone numbers and mobile
//! push to platform endpoints.
//!
//! - [`messages`] builds SMS, push and unified messages
//! - [`sns`] routes messages to destinations and talks to SNS
//! - [`channel`] adapts notifications and recipients to the router

use shadow_rs::shadow;
shadow!(build);

pub mod channel;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod messages;
pub mod sns;

pub use channel::{Notifiable, Notification, SnsChannel};
pub use error::{SnsError, SnsResult};
pub use messages::{Message, SnsContent, SnsMessage, SnsPushMessage, SnsSmsMessage};
pub use sns::{Destination, Sns};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
