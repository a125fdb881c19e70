use crate::messages::SnsContent;
use crate::sns::Destination;

/// Recipient of a notification
///
/// Both methods default to `None`, so a recipient only implements the
/// lookups it supports.
pub trait Notifiable: Send + Sync {
    /// Explicit destination for the given channel
    fn route_notification_for(
        &self,
        _channel: &str,
        _notification: &dyn Notification,
    ) -> Option<Destination> {
        None
    }

    /// Named attribute of the recipient, e.g. `phone_number`
    fn attribute(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Something that can be rendered for the SNS channel
pub trait Notification: Send + Sync {
    /// Renders the content for the recipient, `None` when there is nothing SNS can send
    fn to_sns(&self, notifiable: &dyn Notifiable) -> Option<SnsContent>;

    /// Name used in failure logs
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
