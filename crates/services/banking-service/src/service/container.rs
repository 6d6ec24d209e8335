//! Service Container - Centralized service access.
//!
//! Wires repositories into the services once and hands out shared handles.

use std::sync::Arc;

use super::{AccountManager, AccountService, UserManager, UserService};
use crate::repository::{AccountStore, AccountsRepository, UserStore, UsersRepository};

/// All application services, cheap to clone.
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    account_service: Arc<dyn AccountService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(user_service: Arc<dyn UserService>, account_service: Arc<dyn AccountService>) -> Self {
        Self {
            user_service,
            account_service,
        }
    }

    /// Build both services over the given repositories
    pub fn from_repositories(
        users: Arc<dyn UsersRepository>,
        accounts: Arc<dyn AccountsRepository>,
    ) -> Self {
        let user_service = Arc::new(UserManager::new(users.clone()));
        let account_service = Arc::new(AccountManager::new(users, accounts));
        Self::new(user_service, account_service)
    }

    /// Build both services over fresh in-memory repositories
    pub fn in_memory() -> Self {
        Self::from_repositories(Arc::new(UserStore::new()), Arc::new(AccountStore::new()))
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get account service
    pub fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }
}
