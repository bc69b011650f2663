//! Error handling for the gateway
//!
//! This module defines the error taxonomy used throughout the gateway and the
//! stable JSON shape every error is rendered into.

mod helpers;
mod response;
#[cfg(test)]
mod tests;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
