//! Users repository.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::User;

use super::memory::InMemoryStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Users repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Find user by ID, active or not
    async fn get_entity_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// All users in storage order
    async fn all(&self) -> AppResult<Vec<User>>;

    /// Insert or replace a user
    async fn save(&self, user: User) -> AppResult<User>;
}

/// In-memory users repository
pub type UserStore = InMemoryStore<User>;

#[async_trait]
impl UsersRepository for UserStore {
    async fn get_entity_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(id).await)
    }

    async fn all(&self) -> AppResult<Vec<User>> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        Ok(self.upsert(user).await)
    }
}
