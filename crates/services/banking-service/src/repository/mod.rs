//! Repository layer for data access.

mod accounts_repository;
mod memory;
mod users_repository;

pub use accounts_repository::{AccountStore, AccountsRepository};
pub use memory::{Identified, InMemoryStore};
pub use users_repository::{UserStore, UsersRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use accounts_repository::MockAccountsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use users_repository::MockUsersRepository;
