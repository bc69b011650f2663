//! Test fixtures
//!
//! All fixtures build real components, not mocks.

use chatbot_gateway::auth::{ApiKeyAuthenticator, JwtAuthenticator};
use chatbot_gateway::config::Config;
use std::time::Duration;

pub const JWT_SECRET: &str = "integration-secret-that-is-at-least-32-chars";
pub const SESSION_COOKIE: &str = "dash_session";
pub const RAW_API_KEY: &str = "cbk_live_7f3a9c";

/// Configuration with one provisioned API key and a custom session cookie
pub fn config() -> Config {
    let yaml = format!(
        r#"
server:
  cors:
    allowed_origins: ["https://dashboard.example.com"]
rate_limit:
  window_ms: 60000
  max_tracked_keys: 100
auth:
  jwt_secret: "{secret}"
  session_cookie: "{cookie}"
  api_keys:
    - id: "ci"
      key_hash: "{hash}"
      user_id: "user-7"
      scopes: ["bots:read"]
"#,
        secret = JWT_SECRET,
        cookie = SESSION_COOKIE,
        hash = ApiKeyAuthenticator::hash_key(RAW_API_KEY),
    );
    Config::from_yaml_str(&yaml).unwrap()
}

/// Token accepted by the configured authenticator
pub fn bearer_token(config: &Config, user_id: &str, scopes: &[&str]) -> String {
    let scopes: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
    JwtAuthenticator::from_config(config.auth())
        .issue_token(user_id, &scopes, Duration::from_secs(600))
        .unwrap()
}
