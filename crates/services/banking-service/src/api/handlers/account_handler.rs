//! Account handlers.
//!
//! Every mutation acts on behalf of the user named in the `X-User-Id` header.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{AccountResponse, AccountSortOrder};

use crate::api::extractors::{ActingUser, Path, Query, ValidatedJson};
use crate::api::state::AppState;

/// Account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    /// Account name, unique across accounts
    #[validate(length(min = 1, message = "Account name cannot be empty"))]
    #[schema(example = "Savings")]
    pub name: String,
}

/// Account change request; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeAccountRequest {
    /// New account name
    #[validate(length(min = 1, message = "Account name cannot be empty"))]
    pub name: Option<String>,
}

/// Account search parameters
#[derive(Debug, Default, Deserialize)]
pub struct FindAccountsQuery {
    #[serde(default)]
    pub search: String,
    pub user_id: Option<Uuid>,
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
    #[serde(default)]
    pub sort: AccountSortOrder,
}

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_accounts).post(create_account))
        .route("/:id", put(change_account))
        .route("/:id/inactivate", post(inactivate_account))
        .route(
            "/:id/users/:user_id",
            post(add_user_to_account).delete(remove_user_from_account),
        )
}

/// Open an account owned by the acting user
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "Accounts",
    params(
        ("x-user-id" = Uuid, Header, description = "Acting user")
    ),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "Account name already used")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .services
        .accounts()
        .create_account(user_id, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Search accounts
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "Accounts",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("user_id" = Option<Uuid>, Query, description = "Only accounts this user owns or is member of"),
        ("page_number" = Option<usize>, Query, description = "Zero-based page number"),
        ("page_size" = Option<usize>, Query, description = "Page size"),
        ("sort" = Option<AccountSortOrder>, Query, description = "none or name")
    ),
    responses(
        (status = 200, description = "Matching accounts", body = Vec<AccountResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn find_accounts(
    State(state): State<AppState>,
    Query(query): Query<FindAccountsQuery>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state
        .services
        .accounts()
        .find_accounts(
            &query.search,
            query.user_id,
            query.page_number,
            state.page_size(query.page_size),
            query.sort,
        )
        .await?;

    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Rename an account
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID"),
        ("x-user-id" = Uuid, Header, description = "Acting user, must own the account")
    ),
    request_body = ChangeAccountRequest,
    responses(
        (status = 200, description = "Account after the change", body = AccountResponse),
        (status = 403, description = "Acting user is not the owner"),
        (status = 404, description = "Account or user not found"),
        (status = 409, description = "Account inactive or name already used")
    )
)]
pub async fn change_account(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeAccountRequest>,
) -> AppResult<Json<AccountResponse>> {
    let name = payload.name;
    let account = state
        .services
        .accounts()
        .change_account(
            user_id,
            id,
            Box::new(move |change| match name {
                Some(name) => change.set_name(name),
                None => Ok(()),
            }),
        )
        .await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Inactivate an account
#[utoipa::path(
    post,
    path = "/accounts/{id}/inactivate",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID"),
        ("x-user-id" = Uuid, Header, description = "Acting user, must own the account")
    ),
    responses(
        (status = 200, description = "Account inactivated", body = AccountResponse),
        (status = 403, description = "Acting user is not the owner"),
        (status = 404, description = "Account or user not found"),
        (status = 409, description = "Account already inactive")
    )
)]
pub async fn inactivate_account(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .services
        .accounts()
        .inactivate_account(user_id, id)
        .await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Grant a user access to an account
#[utoipa::path(
    post,
    path = "/accounts/{id}/users/{user_id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID"),
        ("user_id" = Uuid, Path, description = "User to add as member"),
        ("x-user-id" = Uuid, Header, description = "Acting user, must own the account")
    ),
    responses(
        (status = 200, description = "Account with the new member", body = AccountResponse),
        (status = 403, description = "Acting user is not the owner"),
        (status = 404, description = "Account or user not found"),
        (status = 409, description = "Account inactive or user already a member"),
        (status = 422, description = "The owner cannot be added as member")
    )
)]
pub async fn add_user_to_account(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .services
        .accounts()
        .add_user_to_account(user_id, id, member_id)
        .await?;

    Ok(Json(AccountResponse::from(account)))
}

/// Revoke a member's access to an account
#[utoipa::path(
    delete,
    path = "/accounts/{id}/users/{user_id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID"),
        ("user_id" = Uuid, Path, description = "Member to remove"),
        ("x-user-id" = Uuid, Header, description = "Acting user, must own the account")
    ),
    responses(
        (status = 200, description = "Account without the member", body = AccountResponse),
        (status = 403, description = "Acting user is not the owner"),
        (status = 404, description = "Account not found or user not a member")
    )
)]
pub async fn remove_user_from_account(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .services
        .accounts()
        .remove_user_from_account(user_id, id, member_id)
        .await?;

    Ok(Json(AccountResponse::from(account)))
}
