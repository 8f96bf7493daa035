//! Integration tests for authentication endpoints.

use axum::http::StatusCode;
use serde_json::json;

use sitehub_entity::user::UserRole;

use crate::helpers::{PASSWORD, TestApp, unique};

#[tokio::test]
async fn test_login_success() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = app.create_test_user("login", UserRole::Contributor).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access_token"].is_string());
    assert_eq!(response.body["token_type"], "Bearer");
    assert_eq!(response.body["user"]["username"], username.as_str());
    assert_eq!(response.body["user"]["role"], "contributor");
    assert!(response.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = app.create_test_user("badpw", UserRole::Viewer).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": "not-the-password1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": unique("ghost"), "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = app.create_test_user("me", UserRole::Manager).await;
    let token = app.login(&username, PASSWORD).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], username.as_str());
    assert_eq!(response.body["role"], "manager");
}

#[tokio::test]
async fn test_register_creates_viewer_and_rejects_duplicate() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let username = unique("reg");
    let body = json!({ "username": username, "password": PASSWORD });

    let response = app
        .request("POST", "/api/auth/register", Some(body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["role"], "viewer");

    let response = app
        .request("POST", "/api/auth/register", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": unique("weak"), "password": "abc" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
