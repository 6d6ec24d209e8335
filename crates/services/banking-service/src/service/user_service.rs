//! User service - Handles user-related business rules.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{apply_page, Activity, ChangeUser, ChangeUserFn, ErrorReason, User, UserSortOrder};

use super::{reject, rejected};
use crate::repository::UsersRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new active user. The personal identification number must
    /// not be used by any other user.
    async fn create_user(&self, name: String, personal_identification_number: String)
        -> AppResult<User>;

    /// Apply `change` to the user, saving only if a setter was called
    async fn change_user(&self, user_id: Uuid, change: ChangeUserFn) -> AppResult<User>;

    /// Mark the user inactive
    async fn inactivate_user(&self, user_id: Uuid) -> AppResult<User>;

    /// Look up a user, active or not
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Search users.
    ///
    /// Without search string, paging or ordering only active users are
    /// returned. Otherwise inactive users are included.
    async fn find(
        &self,
        search: &str,
        page_number: Option<usize>,
        page_size: Option<usize>,
        sort_order: UserSortOrder,
    ) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UsersRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(
        &self,
        name: String,
        personal_identification_number: String,
    ) -> AppResult<User> {
        let taken = self
            .repo
            .all()
            .await?
            .iter()
            .any(|u| u.personal_identification_number == personal_identification_number);
        if taken {
            return Err(reject(
                Activity::CreateUser,
                ErrorReason::UserPersonalIdNotUnique,
                personal_identification_number,
            ));
        }

        let user = self
            .repo
            .save(User::new(name, personal_identification_number))
            .await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn change_user(&self, user_id: Uuid, change: ChangeUserFn) -> AppResult<User> {
        let user = self
            .repo
            .get_entity_by_id(user_id)
            .await?
            .ok_or_else(|| reject(Activity::UpdateUser, ErrorReason::NotFound, user_id.to_string()))?;

        let taken = self
            .repo
            .all()
            .await?
            .into_iter()
            .map(|u| u.personal_identification_number)
            .collect();

        let mut handle = ChangeUser::new(user, taken);
        change(&mut handle).map_err(rejected)?;

        if !handle.is_changed() {
            tracing::debug!(user_id = %user_id, "No user change requested");
            return Ok(handle.into_user());
        }

        let user = self.repo.save(handle.into_user()).await?;
        tracing::info!(user_id = %user.id, "User changed");
        Ok(user)
    }

    async fn inactivate_user(&self, user_id: Uuid) -> AppResult<User> {
        let mut user = self
            .repo
            .get_entity_by_id(user_id)
            .await?
            .ok_or_else(|| reject(Activity::UpdateUser, ErrorReason::NotFound, user_id.to_string()))?;

        user.inactivate();
        let user = self.repo.save(user).await?;
        tracing::info!(user_id = %user.id, "User inactivated");
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.repo.get_entity_by_id(user_id).await
    }

    async fn find(
        &self,
        search: &str,
        page_number: Option<usize>,
        page_size: Option<usize>,
        sort_order: UserSortOrder,
    ) -> AppResult<Vec<User>> {
        tracing::debug!(search, ?page_number, ?page_size, ?sort_order, "Finding users");
        let users = self.repo.all().await?;

        let unfiltered = search.is_empty()
            && page_number.is_none()
            && page_size.is_none()
            && sort_order == UserSortOrder::None;
        if unfiltered {
            return Ok(users.into_iter().filter(User::is_active).collect());
        }

        let mut users: Vec<User> = if search.is_empty() {
            users
        } else {
            users.into_iter().filter(|u| u.name_contains(search)).collect()
        };

        match sort_order {
            UserSortOrder::PersonalId => users.sort_by(|a, b| {
                a.personal_identification_number
                    .cmp(&b.personal_identification_number)
            }),
            UserSortOrder::Name => users.sort_by(|a, b| a.name.cmp(&b.name)),
            UserSortOrder::None if !search.is_empty() => users.sort_by(|a, b| a.name.cmp(&b.name)),
            UserSortOrder::None => {}
        }

        Ok(apply_page(users, page_number, page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUsersRepository;
    use mockall::predicate::eq;

    fn service(repo: MockUsersRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    fn user(name: &str, pin: &str) -> User {
        User::new(name.to_string(), pin.to_string())
    }

    #[tokio::test]
    async fn create_user_saves_new_active_user() {
        let mut repo = MockUsersRepository::new();
        repo.expect_all().returning(|| Ok(vec![user("Arne", "1")]));
        repo.expect_save().times(1).returning(Ok);

        let created = service(repo)
            .create_user("Bertil".into(), "2".into())
            .await
            .unwrap();

        assert_eq!(created.name, "Bertil");
        assert!(created.is_active());
    }

    #[tokio::test]
    async fn create_user_with_taken_personal_id_never_saves() {
        let mut repo = MockUsersRepository::new();
        repo.expect_all().returning(|| Ok(vec![user("Arne", "1")]));
        repo.expect_save().never();

        let err = service(repo)
            .create_user("Bertil".into(), "1".into())
            .await
            .unwrap_err();

        let domain = err.domain().unwrap();
        assert_eq!(domain.activity, Activity::CreateUser);
        assert!(domain.is(ErrorReason::UserPersonalIdNotUnique));
    }

    #[tokio::test]
    async fn change_user_without_setters_does_not_save() {
        let existing = user("Arne", "1");
        let id = existing.id;

        let mut repo = MockUsersRepository::new();
        let stored = existing.clone();
        repo.expect_get_entity_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        let all = vec![existing.clone()];
        repo.expect_all().returning(move || Ok(all.clone()));
        repo.expect_save().never();

        let unchanged = service(repo)
            .change_user(id, Box::new(|_| Ok(())))
            .await
            .unwrap();

        assert_eq!(unchanged, existing);
    }

    #[tokio::test]
    async fn change_user_with_taken_personal_id_does_not_save() {
        let existing = user("Arne", "1");
        let id = existing.id;

        let mut repo = MockUsersRepository::new();
        let stored = existing.clone();
        repo.expect_get_entity_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        let all = vec![existing.clone(), user("Bertil", "2")];
        repo.expect_all().returning(move || Ok(all.clone()));
        repo.expect_save().never();

        let err = service(repo)
            .change_user(
                id,
                Box::new(|change| {
                    change.set_name("Arnold");
                    change.set_personal_identification_number("2")
                }),
            )
            .await
            .unwrap_err();

        assert_eq!(err.reason(), Some(ErrorReason::UserPersonalIdNotUnique));
        assert_eq!(err.domain().unwrap().activity, Activity::UpdateUser);
    }

    #[tokio::test]
    async fn change_user_unknown_id_is_not_found() {
        let mut repo = MockUsersRepository::new();
        repo.expect_get_entity_by_id().returning(|_| Ok(None));
        repo.expect_all().never();

        let err = service(repo)
            .change_user(Uuid::new_v4(), Box::new(|_| Ok(())))
            .await
            .unwrap_err();

        assert_eq!(err.reason(), Some(ErrorReason::NotFound));
        assert_eq!(err.domain().unwrap().activity, Activity::UpdateUser);
    }

    #[tokio::test]
    async fn inactivate_user_saves_inactive_user() {
        let existing = user("Arne", "1");
        let id = existing.id;

        let mut repo = MockUsersRepository::new();
        repo.expect_get_entity_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_save()
            .withf(|u| !u.is_active())
            .times(1)
            .returning(Ok);

        let user = service(repo).inactivate_user(id).await.unwrap();
        assert!(!user.is_active());
    }

    #[tokio::test]
    async fn inactivate_user_unknown_id_is_not_found() {
        let mut repo = MockUsersRepository::new();
        repo.expect_get_entity_by_id().returning(|_| Ok(None));
        repo.expect_save().never();

        let err = service(repo).inactivate_user(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.reason(), Some(ErrorReason::NotFound));
    }
}
