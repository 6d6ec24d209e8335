//! Application state for dependency injection.

use crate::config::BankingServiceConfig;
use crate::service::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub config: BankingServiceConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, config: BankingServiceConfig) -> Self {
        Self { services, config }
    }

    /// Clamp a requested page size to the configured maximum
    pub fn page_size(&self, requested: Option<usize>) -> Option<usize> {
        requested.map(|size| size.min(self.config.max_page_size))
    }
}
