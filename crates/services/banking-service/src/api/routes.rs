//! Route configuration.

use axum::{response::Json, routing::get, Router};
use utoipa::OpenApi;

use crate::api::handlers::{account_routes, health_routes, user_routes};
use crate::api::openapi::ApiDoc;
use crate::api::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/users", user_routes())
        .nest("/accounts", account_routes())
        .with_state(state)
}
