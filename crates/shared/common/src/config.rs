//! Shared configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    pub log_level: String,
}

impl ServiceConfig {
    /// Load `<PREFIX>_HOST`, `<PREFIX>_PORT` and `<PREFIX>_LOG_LEVEL`,
    /// falling back to `LOG_LEVEL` and then to `defaults`.
    pub fn from_env(prefix: &str, defaults: ServiceConfig) -> Self {
        Self {
            host: env::var(format!("{}_HOST", prefix)).unwrap_or(defaults.host),
            port: parse_env(&format!("{}_PORT", prefix)).unwrap_or(defaults.port),
            log_level: env::var(format!("{}_LOG_LEVEL", prefix))
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or(defaults.log_level),
            service_name: defaults.service_name,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// Read and parse an environment variable, ignoring unset or malformed values.
pub fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
