//! Integration tests for API endpoints.
//!
//! The router runs over in-memory repositories; requests go straight through
//! `tower::ServiceExt::oneshot` without binding a socket.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use banking_service_lib::api::extractors::ACTING_USER_HEADER;
use banking_service_lib::build_app;
use banking_service_lib::config::BankingServiceConfig;

// =============================================================================
// Helpers
// =============================================================================

fn app() -> Router {
    build_app(BankingServiceConfig::default())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    acting_user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(user_id) = acting_user {
        request = request.header(ACTING_USER_HEADER, user_id);
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_user(app: &Router, name: &str, pin: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "name": name, "personal_identification_number": pin })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_account(app: &Router, owner: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/accounts",
        Some(owner),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health / docs
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "banking-service");
}

#[tokio::test]
async fn test_openapi_document_lists_paths() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users"].is_object());
    assert!(body["paths"]["/accounts"].is_object());
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_and_get_user() {
    let app = app();
    let id = create_user(&app, "Lisa Larsson", "19800101-1234").await;

    let (status, body) = send(&app, Method::GET, &format!("/users/{id}"), None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lisa Larsson");
    assert_eq!(body["personal_identification_number"], "19800101-1234");
    assert_eq!(body["active"], true);
}

#[tokio::test]
async fn test_create_user_duplicate_personal_id_conflicts() {
    let app = app();
    create_user(&app, "Arne", "1").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "name": "Bertil", "personal_identification_number": "1" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "USER_PERSONAL_ID_NOT_UNIQUE");
    assert_eq!(body["error"]["activity"], "CREATE_USER");
}

#[tokio::test]
async fn test_create_user_empty_name_is_rejected() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/users",
        None,
        Some(json!({ "name": "", "personal_identification_number": "1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_user_not_found() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let (status, body) = send(&app(), Method::GET, &uri, None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["activity"], "FIND_USER");
}

#[tokio::test]
async fn test_change_user_name() {
    let app = app();
    let id = create_user(&app, "Arne", "1").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        None,
        Some(json!({ "name": "Arnold" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Arnold");
    assert_eq!(body["personal_identification_number"], "1");
}

#[tokio::test]
async fn test_find_users_hides_inactivated() {
    let app = app();
    create_user(&app, "Arne", "1").await;
    let bertil = create_user(&app, "Bertil", "2").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/users/{bertil}/inactivate"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Arne");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_account_requires_acting_user() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/accounts",
        None,
        Some(json!({ "name": "Savings" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_ACTING_USER");
}

#[tokio::test]
async fn test_account_rejects_malformed_acting_user() {
    let (status, _) = send(
        &app(),
        Method::POST,
        "/accounts",
        Some("not-a-uuid"),
        Some(json!({ "name": "Savings" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_account_membership_flow() {
    let app = app();
    let owner = create_user(&app, "Arne", "1").await;
    let member = create_user(&app, "Bertil", "2").await;
    let account = create_account(&app, &owner, "Savings").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/accounts/{account}/users/{member}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!([member]));

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/accounts?user_id={member}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["owner_id"], owner.as_str());

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/accounts/{account}/users/{member}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn test_non_owner_cannot_rename_account() {
    let app = app();
    let owner = create_user(&app, "Arne", "1").await;
    let other = create_user(&app, "Bertil", "2").await;
    let account = create_account(&app, &owner, "Savings").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/accounts/{account}"),
        Some(&other),
        Some(json!({ "name": "Mine" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "NOT_OWNER");
    assert_eq!(body["error"]["activity"], "UPDATE_ACCOUNT");
}

#[tokio::test]
async fn test_add_owner_as_member_is_unprocessable() {
    let app = app();
    let owner = create_user(&app, "Arne", "1").await;
    let account = create_account(&app, &owner, "Savings").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/accounts/{account}/users/{owner}"),
        Some(&owner),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "CANNOT_ADD_OWNER_AS_USER");
}

#[tokio::test]
async fn test_inactivated_account_rejects_changes() {
    let app = app();
    let owner = create_user(&app, "Arne", "1").await;
    let account = create_account(&app, &owner, "Savings").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/accounts/{account}/inactivate"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/accounts/{account}/inactivate"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "NOT_ACTIVE");
}

// =============================================================================
// Request parameters
// =============================================================================

#[tokio::test]
async fn test_page_size_is_capped_by_config() {
    let app = build_app(BankingServiceConfig {
        max_page_size: 2,
        ..BankingServiceConfig::default()
    });
    create_user(&app, "Cecilia", "3").await;
    create_user(&app, "Arne", "1").await;
    create_user(&app, "Bertil", "2").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/users?page_number=0&page_size=50&sort=name",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Arne", "Bertil"]);
}

#[tokio::test]
async fn test_malformed_path_id_renders_error_body() {
    let (status, body) = send(&app(), Method::GET, "/users/not-a-uuid", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_sort_order_renders_error_body() {
    let (status, body) = send(&app(), Method::GET, "/users?sort=bogus", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
