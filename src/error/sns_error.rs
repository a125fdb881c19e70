use crate::sns::BrokerError;
use thiserror::Error;

/// Error type for everything between a notification and the SNS broker.
///
/// Caller-input problems surface as `InvalidArgument` or `CouldNotSend`,
/// broker failures keep their code, message and request id in `Broker`.
#[derive(Error, Debug)]
pub enum SnsError {
    /// The message cannot be routed to the given destination
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The channel could not work out who or what to send
    #[error(transparent)]
    CouldNotSend(#[from] CouldNotSendNotification),

    /// The broker rejected the request
    #[error(transparent)]
    Broker(#[from] BrokerError),

    /// A push payload could not be encoded
    #[error("Failed to encode push payload")]
    Serialization(#[from] serde_json::Error),

    /// The broker client could not be built from configuration
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SnsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns the broker error code when this error came from the broker
    pub fn broker_code(&self) -> Option<&str> {
        match self {
            SnsError::Broker(err) => Some(err.code.as_str()),
            _ => None,
        }
    }
}

/// Failures the channel raises before anything reaches the router
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouldNotSendNotification {
    #[error("Notification was not sent. You should specify a phone number or endpoint ARN for routing.")]
    InvalidReceiver,

    #[error(
        "Notification was not sent. The message should be a plain string or an SNS message instance."
    )]
    InvalidMessageObject,
}

/// Type alias for Result with SnsError
pub type SnsResult<T> = Result<T, SnsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = SnsError::invalid_argument("Push message required to send to endpoint ARN");
        assert_eq!(
            err.to_string(),
            "Invalid argument: Push message required to send to endpoint ARN"
        );
        assert!(err.broker_code().is_none());
    }

    #[test]
    fn test_broker_error_is_transparent() {
        let err: SnsError = BrokerError::new("Publish", "EndpointDisabled", "Endpoint is disabled").into();
        assert_eq!(err.broker_code(), Some("EndpointDisabled"));
        assert_eq!(
            err.to_string(),
            "SNS Publish failed (EndpointDisabled): Endpoint is disabled"
        );
    }

    #[test]
    fn test_could_not_send_conversion() {
        let err: SnsError = CouldNotSendNotification::InvalidReceiver.into();
        assert!(matches!(
            err,
            SnsError::CouldNotSend(CouldNotSendNotification::InvalidReceiver)
        ));
        assert!(err.to_string().contains("phone number or endpoint ARN"));
    }
}
