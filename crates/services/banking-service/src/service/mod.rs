//! Application services layer - Use cases and business rules.
//!
//! Services validate preconditions against repository state, mutate the
//! entity and persist it. They depend on repository traits, never on a
//! concrete store.

mod account_service;
mod container;
mod user_service;

pub use account_service::{AccountManager, AccountService};
pub use container::Services;
pub use user_service::{UserManager, UserService};

use common::AppError;
use domain::{Activity, DomainError, ErrorReason};

/// Log a rule violation on its way out to the caller.
pub(crate) fn rejected(err: DomainError) -> AppError {
    tracing::warn!(activity = %err.activity, reason = %err.reason, "{}", err);
    AppError::Rule(err)
}

/// Build, log and convert a rule violation.
pub(crate) fn reject(activity: Activity, reason: ErrorReason, detail: impl Into<String>) -> AppError {
    rejected(DomainError::new(activity, reason).with_message(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_keeps_activity_reason_and_detail() {
        let err = reject(Activity::FindUser, ErrorReason::NotFound, "42");

        let domain = err.domain().unwrap();
        assert_eq!(domain.activity, Activity::FindUser);
        assert!(domain.is(ErrorReason::NotFound));
        assert_eq!(domain.message.as_deref(), Some("42"));
    }
}
