use serde::{Deserialize, Serialize};

use super::PublishResponse;

/// Where a message goes: a phone number, an endpoint ARN, or several of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    One(String),
    Many(Vec<String>),
}

impl Destination {
    /// True for an empty string or an empty list
    pub fn is_empty(&self) -> bool {
        match self {
            Destination::One(to) => to.is_empty(),
            Destination::Many(list) => list.is_empty(),
        }
    }
}

impl From<&str> for Destination {
    fn from(to: &str) -> Self {
        Destination::One(to.to_string())
    }
}

impl From<String> for Destination {
    fn from(to: String) -> Self {
        Destination::One(to)
    }
}

impl From<Vec<String>> for Destination {
    fn from(list: Vec<String>) -> Self {
        Destination::Many(list)
    }
}

impl From<Vec<&str>> for Destination {
    fn from(list: Vec<&str>) -> Self {
        Destination::Many(list.into_iter().map(str::to_string).collect())
    }
}

/// Recognized broker failure returned as a value instead of an error.
///
/// Serializes to `{error, message, request_id, endpoint}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftFailure {
    pub error: String,
    pub message: String,
    pub request_id: Option<String>,
    pub endpoint: String,
}

/// Result of sending to a single destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Delivery {
    Published(PublishResponse),
    EndpointDisabled(SoftFailure),
}

impl Delivery {
    pub fn is_published(&self) -> bool {
        matches!(self, Delivery::Published(_))
    }
}

/// Result of a router send, shaped like the destination it was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SendOutcome {
    One(Delivery),
    Many(Vec<Delivery>),
}

impl SendOutcome {
    /// Collapses the outcome to one delivery: the last one for a list
    pub fn into_last(self) -> Option<Delivery> {
        match self {
            SendOutcome::One(delivery) => Some(delivery),
            SendOutcome::Many(deliveries) => deliveries.into_iter().last(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn published(id: &str) -> Delivery {
        Delivery::Published(PublishResponse {
            message_id: Some(id.to_string()),
        })
    }

    #[test]
    fn test_destination_is_empty() {
        assert!(Destination::from("").is_empty());
        assert!(Destination::Many(Vec::new()).is_empty());
        assert!(!Destination::from("+1111111111").is_empty());
    }

    #[test]
    fn test_into_last() {
        assert_eq!(SendOutcome::One(published("a")).into_last(), Some(published("a")));
        assert_eq!(
            SendOutcome::Many(vec![published("a"), published("b")]).into_last(),
            Some(published("b"))
        );
        assert_eq!(SendOutcome::Many(Vec::new()).into_last(), None);
    }

    #[test]
    fn test_soft_failure_shape() {
        let failure = SoftFailure {
            error: "EndpointDisabled".to_string(),
            message: "Endpoint is disabled".to_string(),
            request_id: Some("req-123".to_string()),
            endpoint: "arn:aws:sns:us-east-1:123456789012:endpoint/APNS/MyApp/id".to_string(),
        };

        assert_eq!(
            serde_json::to_value(Delivery::EndpointDisabled(failure)).unwrap(),
            json!({
                "error": "EndpointDisabled",
                "message": "Endpoint is disabled",
                "request_id": "req-123",
                "endpoint": "arn:aws:sns:us-east-1:123456789012:endpoint/APNS/MyApp/id",
            })
        );
    }
}
