//! Account domain entity and related types.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Activity, DomainError, DomainResult, ErrorReason};

/// Account domain entity.
///
/// The owner is never part of `users`; members are other users granted
/// access to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub active: bool,
    pub users: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account without members
    pub fn new(owner_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name,
            active: true,
            users: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn has_user(&self, user_id: Uuid) -> bool {
        self.users.contains(&user_id)
    }

    /// Owner or member
    pub fn is_accessible_by(&self, user_id: Uuid) -> bool {
        self.is_owned_by(user_id) || self.has_user(user_id)
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Deactivate the account. There is no way back.
    pub fn inactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Returns false if the user already was a member
    pub fn add_user(&mut self, user_id: Uuid) -> bool {
        let added = self.users.insert(user_id);
        if added {
            self.updated_at = Utc::now();
        }
        added
    }

    /// Returns false if the user was not a member
    pub fn remove_user(&mut self, user_id: Uuid) -> bool {
        let removed = self.users.remove(&user_id);
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, search: &str) -> bool {
        self.name.to_lowercase().contains(&search.to_lowercase())
    }
}

/// Ordering applied by account searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AccountSortOrder {
    #[default]
    None,
    Name,
}

/// Mutation handle passed to `change_account` callbacks.
#[derive(Debug)]
pub struct ChangeAccount {
    account: Account,
    taken_names: HashSet<String>,
    changed: bool,
}

impl ChangeAccount {
    pub fn new(account: Account, taken_names: HashSet<String>) -> Self {
        Self {
            account,
            taken_names,
            changed: false,
        }
    }

    /// Fails if any account, including this one, already has the name.
    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if self.taken_names.contains(&name) {
            return Err(DomainError::new(
                Activity::UpdateAccount,
                ErrorReason::AccountNameNotUnique,
            )
            .with_message(name));
        }
        self.account.rename(name);
        self.changed = true;
        Ok(())
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn into_account(self) -> Account {
        self.account
    }
}

/// Callback applied by `change_account`
pub type ChangeAccountFn = Box<dyn FnOnce(&mut ChangeAccount) -> DomainResult<()> + Send>;

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    /// Unique account identifier
    pub id: Uuid,
    /// Id of the owning user
    pub owner_id: Uuid,
    /// Account name, unique across accounts
    pub name: String,
    /// False once the account has been inactivated
    pub active: bool,
    /// Member users other than the owner
    pub users: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            owner_id: account.owner_id,
            name: account.name,
            active: account.active,
            users: account.users.into_iter().collect(),
            created_at: account.created_at,
        }
    }
}
