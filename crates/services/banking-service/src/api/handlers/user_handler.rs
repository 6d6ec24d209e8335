//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Activity, ErrorReason, UserResponse, UserSortOrder};

use crate::api::extractors::{Path, Query, ValidatedJson};
use crate::api::state::AppState;
use crate::service::reject;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Lisa Larsson")]
    pub name: String,
    /// Personal identification number, unique across users
    #[validate(length(min = 1, message = "Personal identification number cannot be empty"))]
    #[schema(example = "19800101-1234")]
    pub personal_identification_number: String,
}

/// User change request; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeUserRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    /// New personal identification number
    #[validate(length(min = 1, message = "Personal identification number cannot be empty"))]
    pub personal_identification_number: Option<String>,
}

/// User search parameters
#[derive(Debug, Default, Deserialize)]
pub struct FindUsersQuery {
    #[serde(default)]
    pub search: String,
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
    #[serde(default)]
    pub sort: UserSortOrder,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(find_users).post(create_user))
        .route("/:id", get(get_user).put(change_user))
        .route("/:id/inactivate", post(inactivate_user))
}

/// Register a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Personal identification number already used")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .users()
        .create_user(payload.name, payload.personal_identification_number)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Search users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("page_number" = Option<usize>, Query, description = "Zero-based page number"),
        ("page_size" = Option<usize>, Query, description = "Page size"),
        ("sort" = Option<UserSortOrder>, Query, description = "none, name or personal_id")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>)
    )
)]
pub async fn find_users(
    State(state): State<AppState>,
    Query(query): Query<FindUsersQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state
        .services
        .users()
        .find(
            &query.search,
            query.page_number,
            state.page_size(query.page_size),
            query.sort,
        )
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users()
        .get_user(id)
        .await?
        .ok_or_else(|| reject(Activity::FindUser, ErrorReason::NotFound, id.to_string()))?;

    Ok(Json(UserResponse::from(user)))
}

/// Change name and/or personal identification number
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = ChangeUserRequest,
    responses(
        (status = 200, description = "User after the change", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Personal identification number already used")
    )
)]
pub async fn change_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let ChangeUserRequest {
        name,
        personal_identification_number,
    } = payload;

    let user = state
        .services
        .users()
        .change_user(
            id,
            Box::new(move |change| {
                if let Some(name) = name {
                    change.set_name(name);
                }
                if let Some(pin) = personal_identification_number {
                    change.set_personal_identification_number(pin)?;
                }
                Ok(())
            }),
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Inactivate a user
#[utoipa::path(
    post,
    path = "/users/{id}/inactivate",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User inactivated", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn inactivate_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users().inactivate_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}
