//! Test utilities and common setup.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use jobtrack::api;
use jobtrack::auth::{AuthConfig, AuthState};
use jobtrack::db::Database;
use jobtrack::job::{JobRepository, JobService};
use jobtrack::user::{UserRepository, UserService};

/// Create a test AuthConfig with a JWT secret for testing.
fn test_auth_config() -> AuthConfig {
    let mut config = AuthConfig::default();
    config.jwt_secret = Some("test-secret-for-integration-tests-minimum-32-chars".to_string());
    config
}

/// Create a test application backed by an in-memory database.
pub async fn test_app() -> Router {
    let db = Database::in_memory().await.unwrap();

    let auth_state = AuthState::new(test_auth_config()).unwrap();

    let user_service = UserService::new(UserRepository::new(db.pool().clone()));
    let job_service = JobService::new(JobRepository::new(db.pool().clone()));

    let state = api::AppState::new(user_service, job_service, auth_state);
    api::create_router(state)
}

/// Send a JSON request and return (status, parsed body).
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (axum::http::StatusCode, Value) {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Register a user and return their token.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": password,
        })),
    )
    .await;

    assert_eq!(status, axum::http::StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}
