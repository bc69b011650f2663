//! Integration tests for chatbot-gateway
//!
//! These tests drive the real application and components without mocking.

pub mod config_validation_tests;
pub mod error_handling_tests;
pub mod gateway_tests;
