//! API integration tests.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{register, request, test_app};

/// Health endpoint works without authentication.
#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let (status, body) = request(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let app = test_app().await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret1",
            "confirmPassword": "secret1",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["name"], "Ana");
    assert!(body["token"].is_string());
    assert!(body["userId"].as_str().unwrap().starts_with("usr_"));
    // The stored hash never appears in responses
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());

    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({
            "email": "ana@example.com",
            "password": "secret1",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["email"], "ana@example.com");
}

#[tokio::test]
async fn test_register_validation() {
    let app = test_app().await;

    // Missing fields
    let (status, _) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "name": "Ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Short password
    let (status, _) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "abc",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Password confirmation mismatch
    let (status, _) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret1",
            "confirmPassword": "secret2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = test_app().await;

    register(&app, "Ana", "ana@example.com", "secret1").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Imposter",
            "email": "ana@example.com",
            "password": "other99",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

/// Wrong password and unknown email must be indistinguishable.
#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = test_app().await;

    register(&app, "Ana", "ana@example.com", "secret1").await;

    let (wrong_status, wrong_body) = request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "ana@example.com", "password": "nope123" })),
    )
    .await;

    let (absent_status, absent_body) = request(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "nope123" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(absent_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, absent_body);
}

#[tokio::test]
async fn test_jobs_require_authentication() {
    let app = test_app().await;

    let (status, _) = request(&app, Method::GET, "/jobs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, Method::GET, "/jobs", Some("garbage-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &app,
        Method::POST,
        "/jobs",
        None,
        Some(json!({ "company": "Acme", "title": "Engineer", "status": "applied" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_job_canonicalizes() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com", "secret1").await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({
            "company": "  Acme  ",
            "title": "Engineer",
            "status": "applied",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().unwrap().starts_with("job_"));
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["status"], "Applied");
    assert_eq!(body["notes"], "");
    // Defaults to today
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(body["applicationDate"], today.as_str());
}

#[tokio::test]
async fn test_create_job_validation() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com", "secret1").await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({ "company": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &app,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({ "company": "Acme", "title": "Engineer", "status": "hired" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_jobs_with_status_filter() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com", "secret1").await;

    for (company, status) in [("Acme", "applied"), ("Globex", "offer"), ("Initech", "applied")] {
        let (code, _) = request(
            &app,
            Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({ "company": company, "title": "Engineer", "status": status })),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (status, body) = request(&app, Method::GET, "/jobs", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = request(
        &app,
        Method::GET,
        "/jobs?status=Applied",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body.as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|j| j["status"] == "Applied"));

    // "all" means no filter
    let (_, body) = request(&app, Method::GET, "/jobs?status=all", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    // An unknown status matches nothing
    let (status, body) =
        request(&app, Method::GET, "/jobs?status=bogus", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_users_cannot_see_each_others_jobs() {
    let app = test_app().await;
    let ana = register(&app, "Ana", "ana@example.com", "secret1").await;
    let ben = register(&app, "Ben", "ben@example.com", "secret2").await;

    let (_, job) = request(
        &app,
        Method::POST,
        "/jobs",
        Some(&ana),
        Some(json!({ "company": "Acme", "title": "Engineer", "status": "applied" })),
    )
    .await;
    let job_id = job["id"].as_str().unwrap().to_string();

    // Ben's list is empty
    let (_, body) = request(&app, Method::GET, "/jobs", Some(&ben), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // Ben cannot read, update, or delete Ana's job; 404, never 403
    let (status, _) = request(
        &app,
        Method::GET,
        &format!("/jobs/{job_id}"),
        Some(&ben),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/jobs/{job_id}"),
        Some(&ben),
        Some(json!({ "company": "Evil", "title": "Spy", "status": "offer" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/jobs/{job_id}"),
        Some(&ben),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ana's job is untouched
    let (status, body) = request(
        &app,
        Method::GET,
        &format!("/jobs/{job_id}"),
        Some(&ana),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"], "Acme");
}

#[tokio::test]
async fn test_update_job() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com", "secret1").await;

    let (_, job) = request(
        &app,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({
            "company": "Acme",
            "title": "Engineer",
            "status": "applied",
            "applicationDate": "2026-01-15",
        })),
    )
    .await;
    let job_id = job["id"].as_str().unwrap().to_string();

    // Omitting applicationDate keeps the stored value
    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/jobs/{job_id}"),
        Some(&token),
        Some(json!({ "company": "Acme", "title": "Engineer", "status": "interviewing" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Interviewing");
    assert_eq!(body["applicationDate"], "2026-01-15");

    // Unknown job is a 404
    let (status, _) = request(
        &app,
        Method::PUT,
        "/jobs/job_missing00",
        Some(&token),
        Some(json!({ "company": "Acme", "title": "Engineer", "status": "offer" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_job() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com", "secret1").await;

    let (_, job) = request(
        &app,
        Method::POST,
        "/jobs",
        Some(&token),
        Some(json!({ "company": "Acme", "title": "Engineer", "status": "applied" })),
    )
    .await;
    let job_id = job["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        Method::DELETE,
        &format!("/jobs/{job_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], job_id.as_str());
    assert!(body["message"].is_string());

    let (_, body) = request(&app, Method::GET, "/jobs", Some(&token), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // Deleting again is a 404
    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/jobs/{job_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// A full user journey: register, add jobs, progress one, drop another.
#[tokio::test]
async fn test_tracking_scenario() {
    let app = test_app().await;
    let token = register(&app, "Ana", "ana@example.com", "secret1").await;

    let mut ids = Vec::new();
    for company in ["Acme", "Globex", "Initech"] {
        let (status, body) = request(
            &app,
            Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({ "company": company, "title": "Engineer", "status": "applied" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    // Globex moves to interviewing
    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/jobs/{}", ids[1]),
        Some(&token),
        Some(json!({ "company": "Globex", "title": "Engineer", "status": "interviewing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Initech is withdrawn
    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/jobs/{}", ids[2]),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&app, Method::GET, "/jobs", Some(&token), None).await;
    let jobs = body.as_array().unwrap();
    assert_eq!(jobs.len(), 2);

    let (_, body) = request(
        &app,
        Method::GET,
        "/jobs?status=interviewing",
        Some(&token),
        None,
    )
    .await;
    let interviewing = body.as_array().unwrap();
    assert_eq!(interviewing.len(), 1);
    assert_eq!(interviewing[0]["company"], "Globex");
}
