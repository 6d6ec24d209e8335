//! Domain-level errors.
//!
//! Every business rule violation is reported as a [`DomainError`] that names
//! the activity being performed and the reason it was rejected. They are
//! independent of infrastructure concerns (HTTP, storage).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The use case that was running when a rule was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    CreateUser,
    UpdateUser,
    FindUser,
    CreateAccount,
    UpdateAccount,
    InactivateAccount,
    FindAccount,
}

impl Activity {
    /// Stable code used in logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            Activity::CreateUser => "CREATE_USER",
            Activity::UpdateUser => "UPDATE_USER",
            Activity::FindUser => "FIND_USER",
            Activity::CreateAccount => "CREATE_ACCOUNT",
            Activity::UpdateAccount => "UPDATE_ACCOUNT",
            Activity::InactivateAccount => "INACTIVATE_ACCOUNT",
            Activity::FindAccount => "FIND_ACCOUNT",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Why an activity was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    NotFound,
    UserPersonalIdNotUnique,
    AccountNameNotUnique,
    NotOwner,
    NotActive,
    CannotAddOwnerAsUser,
    UserAlreadyAssignedToThisAccount,
    UserNotAssignedToThisAccount,
}

impl ErrorReason {
    /// Stable code used in logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            ErrorReason::NotFound => "NOT_FOUND",
            ErrorReason::UserPersonalIdNotUnique => "USER_PERSONAL_ID_NOT_UNIQUE",
            ErrorReason::AccountNameNotUnique => "ACCOUNT_NAME_NOT_UNIQUE",
            ErrorReason::NotOwner => "NOT_OWNER",
            ErrorReason::NotActive => "NOT_ACTIVE",
            ErrorReason::CannotAddOwnerAsUser => "CANNOT_ADD_OWNER_AS_USER",
            ErrorReason::UserAlreadyAssignedToThisAccount => {
                "USER_ALREADY_ASSIGNED_TO_THIS_ACCOUNT"
            }
            ErrorReason::UserNotAssignedToThisAccount => "USER_NOT_ASSIGNED_TO_THIS_ACCOUNT",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A business rule violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{activity}: {reason}{}", detail_suffix(.message))]
pub struct DomainError {
    pub activity: Activity,
    pub reason: ErrorReason,
    /// Optional human readable detail
    pub message: Option<String>,
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({})", m))
        .unwrap_or_default()
}

impl DomainError {
    /// Create a rule violation without detail
    pub fn new(activity: Activity, reason: ErrorReason) -> Self {
        Self {
            activity,
            reason,
            message: None,
        }
    }

    /// Attach a detail message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Create a not found error
    pub fn not_found(activity: Activity, entity: impl Into<String>) -> Self {
        Self::new(activity, ErrorReason::NotFound).with_message(entity)
    }

    /// Check the reason code
    pub fn is(&self, reason: ErrorReason) -> bool {
        self.reason == reason
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
