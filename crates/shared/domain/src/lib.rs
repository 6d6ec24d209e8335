//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users, accounts, the change handles used by update callbacks and the
//! rule-violation error type.

pub mod account;
pub mod constants;
pub mod error;
pub mod pagination;
pub mod user;

pub use account::{Account, AccountResponse, AccountSortOrder, ChangeAccount, ChangeAccountFn};
pub use constants::*;
pub use error::{Activity, DomainError, DomainResult, ErrorReason};
pub use pagination::apply_page;
pub use user::{ChangeUser, ChangeUserFn, User, UserResponse, UserSortOrder};
