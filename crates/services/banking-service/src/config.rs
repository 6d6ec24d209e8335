//! Banking service configuration.

use common::{parse_env, ServiceConfig};
use domain::DEFAULT_MAX_PAGE_SIZE;

/// Banking service configuration.
#[derive(Debug, Clone)]
pub struct BankingServiceConfig {
    /// Host, port and log level
    pub service: ServiceConfig,
    /// Largest page size accepted by search endpoints
    pub max_page_size: usize,
}

impl BankingServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service: ServiceConfig::from_env("BANKING_SERVICE", defaults.service),
            max_page_size: parse_env::<usize>("BANKING_SERVICE_MAX_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.max_page_size),
        }
    }
}

impl Default for BankingServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "banking-service".to_string(),
                ..ServiceConfig::default()
            },
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}
