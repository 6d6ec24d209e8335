//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::account_handler::{ChangeAccountRequest, CreateAccountRequest};
use crate::api::handlers::user_handler::{ChangeUserRequest, CreateUserRequest};
use domain::{AccountResponse, AccountSortOrder, UserResponse, UserSortOrder};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::find_users,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::change_user,
        crate::api::handlers::user_handler::inactivate_user,
        crate::api::handlers::account_handler::create_account,
        crate::api::handlers::account_handler::find_accounts,
        crate::api::handlers::account_handler::change_account,
        crate::api::handlers::account_handler::inactivate_account,
        crate::api::handlers::account_handler::add_user_to_account,
        crate::api::handlers::account_handler::remove_user_from_account,
    ),
    components(
        schemas(
            CreateUserRequest,
            ChangeUserRequest,
            UserResponse,
            UserSortOrder,
            CreateAccountRequest,
            ChangeAccountRequest,
            AccountResponse,
            AccountSortOrder,
        )
    ),
    tags(
        (name = "Users", description = "User registration and lookup"),
        (name = "Accounts", description = "Account ownership and membership"),
    )
)]
pub struct ApiDoc;
