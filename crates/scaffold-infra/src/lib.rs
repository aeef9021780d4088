//! # scaffold-infra
//!
//! Infrastructure layer building blocks: the error kinds raised by gateways,
//! repositories, and servers, and helpers that shape handler results into
//! status-code responses without tying them to a transport.

pub mod errors;
pub mod response;

pub use errors::InfraError;
pub use response::{ErrorResponse, Response};
