//! HTTP middleware implementations
//!
//! The API gateway wraps a resource and runs every request through:
//! - Preflight short-circuit (CORS policy comes from `Gateway::cors`)
//! - Authentication
//! - Rate limiting
//! - Response cache lookup and population
//! - Uniform error translation

mod gateway;
mod helpers;
mod outcome;


pub use gateway::{ApiGateway, ApiGatewayService, Gateway, RouteConfig};
pub use helpers::extract_auth_method;
pub use outcome::{GatewayOutcome, Quota};
