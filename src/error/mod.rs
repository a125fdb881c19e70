mod endpoint_parser;
mod sns_error;

pub use endpoint_parser::EndpointArnParser;
pub use sns_error::{CouldNotSendNotification, SnsError, SnsResult};
