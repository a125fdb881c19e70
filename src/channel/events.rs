use tracing::error;

use super::{Notifiable, Notification};
use crate::error::SnsError;

/// Raised when a channel gives up on a notification
pub struct NotificationFailed<'a> {
    pub notifiable: &'a dyn Notifiable,
    pub notification: &'a dyn Notification,
    /// Name of the channel that failed, `sns`
    pub channel: &'static str,
    /// Display text of `error`
    pub message: String,
    pub error: SnsError,
}

/// Event bus the channel reports failures to
pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event: NotificationFailed<'_>);
}

/// Dispatcher that only logs the failure
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl EventDispatcher for TracingDispatcher {
    fn dispatch(&self, event: NotificationFailed<'_>) {
        error!(
            channel = event.channel,
            notification = event.notification.kind(),
            broker_code = event.error.broker_code(),
            error = ?event.error,
            "Notification failed: {}",
            event.message
        );
    }
}
