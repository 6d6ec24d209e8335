//! Account service - Handles account ownership, membership and lifecycle.
//!
//! Every mutation is performed on behalf of an acting user, who must own the
//! account.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{
    apply_page, Account, AccountSortOrder, Activity, ChangeAccount, ChangeAccountFn, ErrorReason,
    User,
};

use super::{reject, rejected};
use crate::repository::{AccountsRepository, UsersRepository};

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Open a new account owned by `user_id`
    async fn create_account(&self, user_id: Uuid, account_name: String) -> AppResult<Account>;

    /// Apply `change` to an active account owned by `user_id`
    async fn change_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        change: ChangeAccountFn,
    ) -> AppResult<Account>;

    /// Grant `user_id_to_be_assigned` access to the account
    async fn add_user_to_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        user_id_to_be_assigned: Uuid,
    ) -> AppResult<Account>;

    /// Revoke access previously granted to `user_id_to_be_removed`
    async fn remove_user_from_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        user_id_to_be_removed: Uuid,
    ) -> AppResult<Account>;

    /// Mark an active account inactive
    async fn inactivate_account(&self, user_id: Uuid, account_id: Uuid) -> AppResult<Account>;

    /// Search accounts by name and, optionally, by owner or member
    async fn find_accounts(
        &self,
        search: &str,
        user_id: Option<Uuid>,
        page_number: Option<usize>,
        page_size: Option<usize>,
        sort_order: AccountSortOrder,
    ) -> AppResult<Vec<Account>>;
}

/// Concrete implementation of AccountService using repositories.
pub struct AccountManager {
    users: Arc<dyn UsersRepository>,
    accounts: Arc<dyn AccountsRepository>,
}

impl AccountManager {
    /// Create new account service instance with repositories
    pub fn new(users: Arc<dyn UsersRepository>, accounts: Arc<dyn AccountsRepository>) -> Self {
        Self { users, accounts }
    }

    async fn user(&self, activity: Activity, user_id: Uuid) -> AppResult<User> {
        self.users
            .get_entity_by_id(user_id)
            .await?
            .ok_or_else(|| reject(activity, ErrorReason::NotFound, format!("user {}", user_id)))
    }

    async fn account(&self, activity: Activity, account_id: Uuid) -> AppResult<Account> {
        self.accounts
            .get_entity_by_id(account_id)
            .await?
            .ok_or_else(|| {
                reject(activity, ErrorReason::NotFound, format!("account {}", account_id))
            })
    }

    /// Load an account and check that the acting user exists and owns it.
    async fn owned_account(
        &self,
        activity: Activity,
        user_id: Uuid,
        account_id: Uuid,
    ) -> AppResult<Account> {
        let account = self.account(activity, account_id).await?;
        self.user(activity, user_id).await?;
        if !account.is_owned_by(user_id) {
            return Err(reject(activity, ErrorReason::NotOwner, user_id.to_string()));
        }
        Ok(account)
    }
}

fn ensure_active(activity: Activity, account: &Account) -> AppResult<()> {
    if account.is_active() {
        Ok(())
    } else {
        Err(reject(activity, ErrorReason::NotActive, account.id.to_string()))
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn create_account(&self, user_id: Uuid, account_name: String) -> AppResult<Account> {
        self.user(Activity::CreateAccount, user_id).await?;

        let taken = self
            .accounts
            .all()
            .await?
            .iter()
            .any(|a| a.name == account_name);
        if taken {
            return Err(reject(
                Activity::CreateAccount,
                ErrorReason::AccountNameNotUnique,
                account_name,
            ));
        }

        let account = self.accounts.save(Account::new(user_id, account_name)).await?;
        tracing::info!(account_id = %account.id, owner_id = %user_id, "Account created");
        Ok(account)
    }

    async fn change_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        change: ChangeAccountFn,
    ) -> AppResult<Account> {
        let account = self
            .owned_account(Activity::UpdateAccount, user_id, account_id)
            .await?;
        ensure_active(Activity::UpdateAccount, &account)?;

        let taken = self
            .accounts
            .all()
            .await?
            .into_iter()
            .map(|a| a.name)
            .collect();

        let mut handle = ChangeAccount::new(account, taken);
        change(&mut handle).map_err(rejected)?;

        if !handle.is_changed() {
            tracing::debug!(account_id = %account_id, "No account change requested");
            return Ok(handle.into_account());
        }

        let account = self.accounts.save(handle.into_account()).await?;
        tracing::info!(account_id = %account.id, "Account changed");
        Ok(account)
    }

    async fn add_user_to_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        user_id_to_be_assigned: Uuid,
    ) -> AppResult<Account> {
        let activity = Activity::UpdateAccount;
        let mut account = self.owned_account(activity, user_id, account_id).await?;
        self.user(activity, user_id_to_be_assigned).await?;
        ensure_active(activity, &account)?;

        if account.is_owned_by(user_id_to_be_assigned) {
            return Err(reject(
                activity,
                ErrorReason::CannotAddOwnerAsUser,
                user_id_to_be_assigned.to_string(),
            ));
        }
        if !account.add_user(user_id_to_be_assigned) {
            return Err(reject(
                activity,
                ErrorReason::UserAlreadyAssignedToThisAccount,
                user_id_to_be_assigned.to_string(),
            ));
        }

        let account = self.accounts.save(account).await?;
        tracing::info!(
            account_id = %account.id,
            user_id = %user_id_to_be_assigned,
            "User added to account"
        );
        Ok(account)
    }

    async fn remove_user_from_account(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        user_id_to_be_removed: Uuid,
    ) -> AppResult<Account> {
        let activity = Activity::UpdateAccount;
        let mut account = self.owned_account(activity, user_id, account_id).await?;

        if !account.remove_user(user_id_to_be_removed) {
            return Err(reject(
                activity,
                ErrorReason::UserNotAssignedToThisAccount,
                user_id_to_be_removed.to_string(),
            ));
        }

        let account = self.accounts.save(account).await?;
        tracing::info!(
            account_id = %account.id,
            user_id = %user_id_to_be_removed,
            "User removed from account"
        );
        Ok(account)
    }

    async fn inactivate_account(&self, user_id: Uuid, account_id: Uuid) -> AppResult<Account> {
        let activity = Activity::InactivateAccount;
        let mut account = self.owned_account(activity, user_id, account_id).await?;
        ensure_active(activity, &account)?;

        account.inactivate();
        let account = self.accounts.save(account).await?;
        tracing::info!(account_id = %account.id, "Account inactivated");
        Ok(account)
    }

    async fn find_accounts(
        &self,
        search: &str,
        user_id: Option<Uuid>,
        page_number: Option<usize>,
        page_size: Option<usize>,
        sort_order: AccountSortOrder,
    ) -> AppResult<Vec<Account>> {
        tracing::debug!(search, ?user_id, ?page_number, ?page_size, ?sort_order, "Finding accounts");
        if let Some(user_id) = user_id {
            self.user(Activity::FindAccount, user_id).await?;
        }

        let mut accounts: Vec<Account> = self
            .accounts
            .all()
            .await?
            .into_iter()
            .filter(|a| search.is_empty() || a.name_contains(search))
            .filter(|a| user_id.map_or(true, |id| a.is_accessible_by(id)))
            .collect();

        if sort_order == AccountSortOrder::Name {
            accounts.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(apply_page(accounts, page_number, page_size))
    }
}
