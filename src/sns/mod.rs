//! SNS routing layer.
//!
//! [`Sns`] is the destination router, [`SnsBroker`] the seam to the SNS API
//! and [`RusotoBroker`] its production implementation.

mod broker;
mod outcome;
mod router;
mod rusoto_broker;

pub use broker::{
    BrokerError, CreatePlatformEndpointRequest, CreatePlatformEndpointResponse,
    MessageAttributeValue, PublishRequest, PublishResponse, SetEndpointAttributesRequest,
    SnsBroker,
};
#[cfg(test)]
pub use broker::MockSnsBroker;
pub use outcome::{Delivery, Destination, SendOutcome, SoftFailure};
pub use router::{
    ENDPOINT_ARN_PREFIX, ORIGINATION_NUMBER_ATTRIBUTE, SENDER_ID_ATTRIBUTE, SMS_TYPE_ATTRIBUTE, Sns,
};
pub use rusoto_broker::RusotoBroker;
