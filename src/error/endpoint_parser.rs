use regex::Regex;
use std::sync::OnceLock;

/// Utility for reading endpoint ARNs out of SNS error messages.
///
/// `CreatePlatformEndpoint` reports a token that is already registered only
/// through its message text, e.g.
/// `Invalid parameter: Token Reason: Endpoint arn:aws:sns:...:endpoint/APNS/app/id already exists with the same Token, but different attributes.`
///
/// The match is against one literal phrasing. If the broker ever exposes the
/// ARN as a structured field, prefer that over this parser.
pub struct EndpointArnParser;

/// Matches "endpoint <ARN> already exists with the same token", any case
static EXISTING_ENDPOINT: OnceLock<Regex> = OnceLock::new();

impl EndpointArnParser {
    fn pattern() -> &'static Regex {
        EXISTING_ENDPOINT.get_or_init(|| {
            Regex::new(r"(?i)endpoint (arn:aws:sns[^ ]+) already exists with the same token")
                .unwrap()
        })
    }

    /// Extracts the ARN of the endpoint that already owns a token.
    ///
    /// # Returns
    /// The ARN if the message matches the "already exists" phrasing, None otherwise
    pub fn existing_endpoint(message: &str) -> Option<String> {
        Self::pattern()
            .captures(message)
            .and_then(|captures| captures.get(1))
            .map(|arn| arn.as_str().to_string())
    }
}
