//! Command handlers
//!
//! Each handler runs one subcommand and returns its result as JSON for the
//! executor to print.

pub mod check_config;
pub mod endpoint;
pub mod send;

pub use check_config::CheckConfigHandler;
pub use endpoint::EndpointCommandHandler;
pub use send::{SendCommandHandler, push_message, sms_message};
