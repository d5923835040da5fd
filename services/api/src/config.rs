//! Server configuration from environment variables

use std::env;

/// Server configuration struct
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener on
    pub host: String,
    /// Port to bind the listener on
    pub port: u16,
    /// Session token lifetime in seconds
    pub session_ttl_seconds: i64,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(604_800); // 7 days

        Self {
            host,
            port,
            session_ttl_seconds,
        }
    }
}
