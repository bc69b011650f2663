//! Utility modules for the gateway
//!
//! - **error**: Error taxonomy and its HTTP rendering
//! - **logging**: Structured logging setup

pub mod error;
pub mod logging;
