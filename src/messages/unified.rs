use super::{SnsPushMessage, SnsSmsMessage};

/// Container carrying an SMS and a push rendition of the same notification.
///
/// The router picks the child per destination: endpoint ARNs get the push
/// message, anything else gets the SMS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnsMessage {
    sms: Option<SnsSmsMessage>,
    push: Option<SnsPushMessage>,
}

impl SnsMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create() -> Self {
        Self::default()
    }

    /// Sets the SMS child message
    pub fn sms(mut self, sms: SnsSmsMessage) -> Self {
        self.sms = Some(sms);
        self
    }

    /// Sets the push child message
    pub fn push(mut self, push: SnsPushMessage) -> Self {
        self.push = Some(push);
        self
    }

    pub fn get_sms(&self) -> Option<&SnsSmsMessage> {
        self.sms.as_ref()
    }

    pub fn get_push(&self) -> Option<&SnsPushMessage> {
        self.push.as_ref()
    }

    /// True when an SMS child is present
    pub fn is_sms(&self) -> bool {
        self.sms.is_some()
    }

    /// True when a push child is present
    pub fn is_push(&self) -> bool {
        self.push.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_container() {
        let message = SnsMessage::create();
        assert!(message.get_sms().is_none());
        assert!(message.get_push().is_none());
        assert!(!message.is_sms());
        assert!(!message.is_push());
    }

    #[test]
    fn test_children_are_kept() {
        let message = SnsMessage::new()
            .sms(SnsSmsMessage::new("Text version"))
            .push(SnsPushMessage::new("Push version"));

        assert_eq!(message.get_sms().unwrap().get_body(), "Text version");
        assert_eq!(message.get_push().unwrap().get_body(), "Push version");
        assert!(message.is_sms());
        assert!(message.is_push());
    }
}
