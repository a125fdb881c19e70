//! `SnsBroker` backed by `rusoto_sns`.

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use rusoto_core::credential::{DefaultCredentialsProvider, StaticProvider};
use rusoto_core::request::BufferedHttpResponse;
use rusoto_core::{HttpClient, Region, RusotoError};
use rusoto_sns::{
    CreatePlatformEndpointInput, MessageAttributeValue as RusotoAttributeValue, PublishInput,
    SetEndpointAttributesInput, Sns as SnsApi, SnsClient,
};

use super::broker::{
    BrokerError, CreatePlatformEndpointRequest, CreatePlatformEndpointResponse, PublishRequest,
    PublishResponse, SetEndpointAttributesRequest, SnsBroker,
};
use crate::config::AwsConfig;
use crate::error::{SnsError, SnsResult};

/// Header SNS uses for the request id on error responses
const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// Patterns for the XML error document of an unparsed error response
struct ErrorBodyPatterns {
    code: Regex,
    message: Regex,
    request_id: Regex,
}

static ERROR_BODY_PATTERNS: OnceLock<ErrorBodyPatterns> = OnceLock::new();

impl ErrorBodyPatterns {
    fn get() -> &'static Self {
        ERROR_BODY_PATTERNS.get_or_init(|| Self {
            code: Regex::new(r"<Code>([^<]*)</Code>").unwrap(),
            message: Regex::new(r"<Message>([^<]*)</Message>").unwrap(),
            request_id: Regex::new(r"<RequestId>([^<]*)</RequestId>").unwrap(),
        })
    }

    fn capture(pattern: &Regex, body: &str) -> Option<String> {
        pattern
            .captures(body)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str().to_string())
    }
}

/// SNS broker talking to AWS through rusoto
pub struct RusotoBroker {
    client: SnsClient,
}

impl RusotoBroker {
    pub fn new(client: SnsClient) -> Self {
        Self { client }
    }

    /// Builds a client from the `[aws]` settings.
    ///
    /// Static credentials are used when both keys are configured, otherwise
    /// the default provider chain (environment, profile, instance metadata).
    pub fn from_config(config: &AwsConfig) -> SnsResult<Self> {
        let region = Self::region(config)?;
        let dispatcher = HttpClient::new().map_err(|e| SnsError::Configuration {
            key: "aws".to_string(),
            source: anyhow::anyhow!("Failed to build HTTP client: {}", e),
        })?;

        let client = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key), Some(secret)) => {
                let provider = StaticProvider::new(
                    key.clone(),
                    secret.clone(),
                    config.session_token.clone(),
                    None,
                );
                SnsClient::new_with(dispatcher, provider, region)
            }
            _ => {
                let provider =
                    DefaultCredentialsProvider::new().map_err(|e| SnsError::Configuration {
                        key: "aws.credentials".to_string(),
                        source: anyhow::anyhow!("{}", e),
                    })?;
                SnsClient::new_with(dispatcher, provider, region)
            }
        };

        Ok(Self::new(client))
    }

    fn region(config: &AwsConfig) -> SnsResult<Region> {
        match &config.endpoint {
            Some(endpoint) => Ok(Region::Custom {
                name: config.region.clone(),
                endpoint: endpoint.clone(),
            }),
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| SnsError::Configuration {
                    key: "aws.region".to_string(),
                    source: anyhow::anyhow!("{}", e),
                }),
        }
    }

    fn publish_input(request: PublishRequest) -> PublishInput {
        let attributes: HashMap<String, RusotoAttributeValue> = request
            .message_attributes
            .into_iter()
            .map(|(name, value)| {
                let value = RusotoAttributeValue {
                    data_type: value.data_type,
                    string_value: Some(value.string_value),
                    ..Default::default()
                };
                (name, value)
            })
            .collect();

        PublishInput {
            message: request.message,
            message_structure: request.message_structure,
            phone_number: request.phone_number,
            target_arn: request.target_arn,
            message_attributes: (!attributes.is_empty()).then_some(attributes),
            ..Default::default()
        }
    }

    /// Converts a rusoto error into a `BrokerError`.
    ///
    /// Service errors carry their code only as the variant name, which is
    /// what the `Debug` output starts with.
    fn broker_error<E>(operation: &str, err: RusotoError<E>) -> BrokerError
    where
        E: std::error::Error + std::fmt::Debug + 'static,
    {
        match err {
            RusotoError::Service(e) => {
                BrokerError::new(operation, service_error_code(&e), e.to_string())
            }
            RusotoError::Unknown(response) => Self::unknown_error(operation, &response),
            RusotoError::HttpDispatch(e) => {
                BrokerError::new(operation, "HttpDispatch", e.to_string())
            }
            RusotoError::Credentials(e) => BrokerError::new(operation, "Credentials", e.to_string()),
            RusotoError::Validation(message) => BrokerError::new(operation, "Validation", message),
            RusotoError::ParseError(message) => BrokerError::new(operation, "ParseError", message),
            RusotoError::Blocking => {
                BrokerError::new(operation, "Blocking", "Failed to run blocking future")
            }
        }
    }

    fn unknown_error(operation: &str, response: &BufferedHttpResponse) -> BrokerError {
        let patterns = ErrorBodyPatterns::get();
        let body = response.body_as_str();

        let code = ErrorBodyPatterns::capture(&patterns.code, body)
            .unwrap_or_else(|| format!("HTTP{}", response.status.as_u16()));
        let message =
            ErrorBodyPatterns::capture(&patterns.message, body).unwrap_or_else(|| body.to_string());
        let request_id = response
            .headers
            .get(REQUEST_ID_HEADER)
            .cloned()
            .or_else(|| ErrorBodyPatterns::capture(&patterns.request_id, body));

        BrokerError {
            operation: operation.to_string(),
            code,
            message,
            request_id,
        }
    }
}

fn service_error_code(err: &impl std::fmt::Debug) -> String {
    let debug = format!("{:?}", err);
    debug
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[async_trait]
impl SnsBroker for RusotoBroker {
    async fn publish(&self, request: PublishRequest) -> Result<PublishResponse, BrokerError> {
        let output = self
            .client
            .publish(Self::publish_input(request))
            .await
            .map_err(|e| Self::broker_error("Publish", e))?;

        Ok(PublishResponse {
            message_id: output.message_id,
        })
    }

    async fn create_platform_endpoint(
        &self,
        request: CreatePlatformEndpointRequest,
    ) -> Result<CreatePlatformEndpointResponse, BrokerError> {
        let input = CreatePlatformEndpointInput {
            token: request.token,
            platform_application_arn: request.platform_application_arn,
            custom_user_data: request.custom_user_data,
            ..Default::default()
        };

        let output = self
            .client
            .create_platform_endpoint(input)
            .await
            .map_err(|e| Self::broker_error("CreatePlatformEndpoint", e))?;

        Ok(CreatePlatformEndpointResponse {
            endpoint_arn: output.endpoint_arn,
        })
    }

    async fn set_endpoint_attributes(
        &self,
        request: SetEndpointAttributesRequest,
    ) -> Result<(), BrokerError> {
        let input = SetEndpointAttributesInput {
            endpoint_arn: request.endpoint_arn,
            attributes: request.attributes.into_iter().collect(),
        };

        self.client
            .set_endpoint_attributes(input)
            .await
            .map_err(|e| Self::broker_error("SetEndpointAttributes", e))
    }
}
