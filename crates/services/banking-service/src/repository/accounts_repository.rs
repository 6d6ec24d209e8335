//! Accounts repository.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::Account;

use super::memory::InMemoryStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Accounts repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    /// Find account by ID, active or not
    async fn get_entity_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// All accounts in storage order
    async fn all(&self) -> AppResult<Vec<Account>>;

    /// Insert or replace an account
    async fn save(&self, account: Account) -> AppResult<Account>;
}

/// In-memory accounts repository
pub type AccountStore = InMemoryStore<Account>;

#[async_trait]
impl AccountsRepository for AccountStore {
    async fn get_entity_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.get(id).await)
    }

    async fn all(&self) -> AppResult<Vec<Account>> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, account: Account) -> AppResult<Account> {
        Ok(self.upsert(account).await)
    }
}
