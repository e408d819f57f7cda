//! End-to-end tests for the dispatcher and JSON API.
//!
//! Each test builds the full router over a fresh in-memory SQLite database
//! and drives it with `oneshot`, so no server or network is involved.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use common::DatabaseConfig;
use domain::NewUser;
use user_repository_lib::{Database, UserRepository, UserStore};
use web_lib::build_app;

// =============================================================================
// Test Helpers
// =============================================================================

async fn open_database() -> Database {
    Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should open")
}

async fn setup() -> (Router, UserStore) {
    let database = open_database().await;
    let store = UserStore::new(database.get_connection());
    (build_app(database), store)
}

/// Router whose database pool is already closed.
async fn setup_closed() -> Router {
    let database = open_database().await;
    let app = build_app(database.clone());
    database.get_connection().close().await.unwrap();
    app
}

async fn seed_driss(store: &UserStore) {
    store
        .save(NewUser::new("driss", "driss@gmail.com"))
        .await
        .unwrap();
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Dispatcher
// =============================================================================

#[tokio::test]
async fn test_profile_action_renders_user() {
    let (app, store) = setup().await;
    seed_driss(&store).await;

    let (status, body) = send(app, get("/?action=profile&id=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Name: driss</p>"));
    assert!(body.contains("<p>Email: driss@gmail.com</p>"));
}

#[tokio::test]
async fn test_index_path_dispatches_too() {
    let (app, store) = setup().await;
    seed_driss(&store).await;

    let (status, body) = send(app, get("/index?action=profile&id=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Name: driss"));
}

#[tokio::test]
async fn test_profile_action_unknown_id_is_not_found() {
    let (app, store) = setup().await;
    seed_driss(&store).await;

    let (status, body) = send(app, get("/?action=profile&id=99")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("User not found"));
}

#[tokio::test]
async fn test_profile_action_rejects_bad_ids() {
    let (app, _store) = setup().await;

    let (status, body) = send(app.clone(), get("/?action=profile")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Missing id"));

    let (status, body) = send(app, get("/?action=profile&id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid id: abc"));
}

#[tokio::test]
async fn test_malformed_query_renders_html_error() {
    let (app, _store) = setup().await;

    let response = app
        .oneshot(get("/?action=profile&id=1&id=2"))
        .await
        .unwrap();
    let status = response.status();
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("<h1>Bad Request</h1>"));
    assert!(body.contains("duplicate field"));
}

#[tokio::test]
async fn test_unknown_action_is_bad_request() {
    let (app, _store) = setup().await;

    let (status, body) = send(app, get("/?action=delete&id=1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown action: delete"));
}

#[tokio::test]
async fn test_list_action_and_default() {
    let (app, store) = setup().await;
    seed_driss(&store).await;
    store
        .save(NewUser::new("amina", "amina@example.com"))
        .await
        .unwrap();

    let (status, body) = send(app.clone(), get("/?action=list")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">driss</a>"));
    assert!(body.contains(">amina</a>"));

    let (status, default_body) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(default_body, body);
}

#[tokio::test]
async fn test_save_action_inserts_and_renders() {
    let (app, store) = setup().await;

    let (status, body) = send(
        app,
        post_form("/?action=save", "name=driss&email=driss%40gmail.com"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("<p>Email: driss@gmail.com</p>"));

    let users = store.list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "driss");
    assert_eq!(users[0].email, "driss@gmail.com");
}

#[tokio::test]
async fn test_save_action_escapes_markup() {
    let (app, _store) = setup().await;

    let (status, body) = send(
        app,
        post_form(
            "/?action=save",
            "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E&email=x%40example.com",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!body.contains("<script>"));
}

#[tokio::test]
async fn test_save_action_with_missing_field_is_bad_request() {
    let (app, store) = setup().await;

    let (status, _body) = send(app, post_form("/?action=save", "name=driss")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_method_mismatch_is_rejected() {
    let (app, store) = setup().await;

    let (status, _body) = send(app.clone(), get("/?action=save")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _body) = send(app.clone(), post_form("/?action=list", "")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = send(
        app,
        post_form("/?action=profile&id=1", "name=driss&email=driss%40gmail.com"),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body.contains("action profile does not accept POST"));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_database_failure_renders_generic_error() {
    let app = setup_closed().await;

    let (status, body) = send(app.clone(), get("/?action=list")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("A database error occurred"));
    assert!(!body.to_lowercase().contains("pool"));

    let (status, body) = send(app, get("/api/users/1")).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        serde_json::json!({
            "error": {"code": "DATABASE_ERROR", "message": "A database error occurred"}
        })
    );
}

// =============================================================================
// JSON API
// =============================================================================

#[tokio::test]
async fn test_api_get_user() {
    let (app, store) = setup().await;
    seed_driss(&store).await;

    let (status, body) = send(app, get("/api/users/1")).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"id": 1, "name": "driss", "email": "driss@gmail.com"})
    );
}

#[tokio::test]
async fn test_api_missing_user_uses_error_body() {
    let (app, _store) = setup().await;

    let (status, body) = send(app, get("/api/users/7")).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        serde_json::json!({"error": {"code": "NOT_FOUND", "message": "User not found"}})
    );
}

#[tokio::test]
async fn test_api_create_then_list() {
    let (app, _store) = setup().await;

    let (status, body) = send(
        app.clone(),
        post_json(
            "/api/users",
            serde_json::json!({"name": "driss", "email": "driss@gmail.com"}),
        ),
    )
    .await;
    let created: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "driss");
    assert!(created["id"].as_i64().unwrap() >= 1);

    let (status, body) = send(app, get("/api/users")).await;
    let listed: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn test_api_create_rejects_malformed_body() {
    let (app, _store) = setup().await;

    let (status, body) = send(
        app,
        post_json("/api/users", serde_json::json!({"name": "driss"})),
    )
    .await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let (app, _store) = setup().await;

    let (status, body) = send(app, get("/health")).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_database_unreachable() {
    let app = setup_closed().await;

    let (status, body) = send(app, get("/health")).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["services"]["database"]["status"], "unhealthy");
    assert!(json["services"]["database"]["error"].is_string());
}
