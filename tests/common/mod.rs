//! Common test utilities for chatbot-gateway
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures;
//!
//! let config = fixtures::config();
//! let token = fixtures::bearer_token(&config, "user-1", &["bots:read"]);
//! ```

pub mod fixtures;
