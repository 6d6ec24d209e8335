//! User domain entity and related types.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Activity, DomainError, DomainResult, ErrorReason};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub personal_identification_number: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a generated id
    pub fn new(name: String, personal_identification_number: String) -> Self {
        Self::with_id(Uuid::new_v4(), name, personal_identification_number)
    }

    /// Create an active user with a specific id
    pub fn with_id(id: Uuid, name: String, personal_identification_number: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            personal_identification_number,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Update user's name
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update user's personal identification number
    pub fn change_personal_identification_number(&mut self, pin: String) {
        self.personal_identification_number = pin;
        self.updated_at = Utc::now();
    }

    /// Deactivate the user. There is no way back.
    pub fn inactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, search: &str) -> bool {
        self.name.to_lowercase().contains(&search.to_lowercase())
    }
}

/// Ordering applied by user searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserSortOrder {
    #[default]
    None,
    Name,
    PersonalId,
}

/// Mutation handle passed to `change_user` callbacks.
///
/// Holds the user being changed and the personal ids already taken, so that
/// a new personal id can be checked without going back to the repository.
#[derive(Debug)]
pub struct ChangeUser {
    user: User,
    taken_personal_ids: HashSet<String>,
    changed: bool,
}

impl ChangeUser {
    pub fn new(user: User, taken_personal_ids: HashSet<String>) -> Self {
        Self {
            user,
            taken_personal_ids,
            changed: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.user.rename(name.into());
        self.changed = true;
    }

    /// Fails if any user, including this one, already holds the number.
    pub fn set_personal_identification_number(&mut self, pin: impl Into<String>) -> DomainResult<()> {
        let pin = pin.into();
        if self.taken_personal_ids.contains(&pin) {
            return Err(DomainError::new(
                Activity::UpdateUser,
                ErrorReason::UserPersonalIdNotUnique,
            )
            .with_message(pin));
        }
        self.user.change_personal_identification_number(pin);
        self.changed = true;
        Ok(())
    }

    /// Whether any setter was applied
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn into_user(self) -> User {
        self.user
    }
}

/// Callback applied by `change_user`
pub type ChangeUserFn = Box<dyn FnOnce(&mut ChangeUser) -> DomainResult<()> + Send>;

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// User display name
    pub name: String,
    /// Personal identification number, unique across users
    pub personal_identification_number: String,
    /// False once the user has been inactivated
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            personal_identification_number: user.personal_identification_number,
            active: user.active,
            created_at: user.created_at,
        }
    }
}
