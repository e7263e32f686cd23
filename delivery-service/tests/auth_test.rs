//! Registration and login flows.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, TEST_ADMIN_SIGNUP_TOKEN, TEST_PASSWORD};

#[tokio::test]
async fn signup_returns_created_with_username() {
    let app = TestApp::spawn();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": TEST_PASSWORD,
                "role": "owner",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn signup_defaults_to_customer_role() {
    let app = TestApp::spawn();

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "username": "dan",
                "email": "dan@example.com",
                "password": TEST_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // A default-role account behaves like a customer: store creation denied.
    let token = app.login("dan").await;
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/stores",
            Some(&token),
            Some(json!({ "name": "단이네", "phone": "02-0000-0000" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = TestApp::spawn();
    app.signup("alice", "owner").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "username": "alice",
                "email": "alice2@example.com",
                "password": TEST_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::spawn();
    app.signup("alice", "owner").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "username": "alice2",
                "email": "alice@example.com",
                "password": TEST_PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn staff_signup_requires_admin_token() {
    let app = TestApp::spawn();

    for role in ["manager", "master"] {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(json!({
                    "username": format!("{}1", role),
                    "email": format!("{}1@example.com", role),
                    "password": TEST_PASSWORD,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/auth/signup",
                None,
                Some(json!({
                    "username": format!("{}2", role),
                    "email": format!("{}2@example.com", role),
                    "password": TEST_PASSWORD,
                    "role": role,
                    "admin_token": TEST_ADMIN_SIGNUP_TOKEN,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn unknown_role_is_a_bad_request() {
    let app = TestApp::spawn();

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "username": "eve",
                "email": "eve@example.com",
                "password": TEST_PASSWORD,
                "role": "superadmin",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn short_password_fails_validation() {
    let app = TestApp::spawn();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "short",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Validation error")));
}

#[tokio::test]
async fn login_issues_a_bearer_token() {
    let app = TestApp::spawn();
    app.signup("alice", "owner").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "alice", "password": TEST_PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["expires_in"].as_i64().is_some_and(|s| s > 0));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::spawn();
    app.signup("alice", "owner").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "wrongPassword123" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = TestApp::spawn();

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "ghost", "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
