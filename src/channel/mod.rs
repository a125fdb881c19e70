//! Notification channel for SNS.
//!
//! The host application describes recipients with [`Notifiable`] and what to
//! send with [`Notification`]. [`SnsChannel`] resolves both, hands them to the
//! router and reports failures through an [`EventDispatcher`] instead of
//! returning them.

mod events;
mod notifiable;
mod sns_channel;

pub use events::{EventDispatcher, NotificationFailed, TracingDispatcher};
pub use notifiable::{Notifiable, Notification};
pub use sns_channel::{CHANNEL_NAME, ENDPOINT_ATTRIBUTES, PHONE_ATTRIBUTES, SnsChannel};
