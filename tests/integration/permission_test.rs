//! Integration tests for role-based access control.

use axum::http::StatusCode;
use serde_json::json;

use sitehub_entity::user::UserRole;

use crate::helpers::{PASSWORD, TestApp, unique, unique_code};

#[tokio::test]
async fn test_admin_can_list_users() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let token = app.token_for("permadmin", UserRole::Admin).await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["items"].is_array());
}

#[tokio::test]
async fn test_manager_cannot_manage_users() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let token = app.token_for("permmgr", UserRole::Manager).await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_creates_user_who_can_log_in() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let token = app.token_for("creator", UserRole::Admin).await;
    let username = unique("created");

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "username": username,
                "password": PASSWORD,
                "role": "contributor",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["role"], "contributor");

    app.login(&username, PASSWORD).await;
}

#[tokio::test]
async fn test_disabled_user_cannot_log_in() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let admin = app.token_for("disabler", UserRole::Admin).await;
    let username = app.create_test_user("disabled", UserRole::Viewer).await;

    let list = app
        .request(
            "GET",
            &format!("/api/users?search={username}"),
            None,
            Some(&admin),
        )
        .await;
    let id = list.body["items"][0]["id"].as_str().expect("user id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "status": "inactive" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_roles_listing() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let token = app.token_for("roles", UserRole::Viewer).await;

    let response = app.request("GET", "/api/roles", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_viewer_is_read_only() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("romgr", UserRole::Manager).await;
    let viewer = app.token_for("roviewer", UserRole::Viewer).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .request("GET", "/api/projects", None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({
                "project_id": project_id,
                "name": "nope.pdf",
                "url": "https://files.example.test/nope.pdf",
            })),
            Some(&viewer),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "project_id": project_id, "title": "Pour slab" })),
            Some(&viewer),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", "/api/activity-logs", None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_contributor_cannot_delete_documents_or_projects() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("delmgr", UserRole::Manager).await;
    let contributor = app.token_for("delcontrib", UserRole::Contributor).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({
                "project_id": project_id,
                "name": "keep.pdf",
                "url": "https://files.example.test/keep.pdf",
            })),
            Some(&contributor),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let doc_id = response.body["id"].as_str().expect("document id").to_string();

    let response = app
        .request("DELETE", &format!("/api/documents/{doc_id}"), None, Some(&contributor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/projects/{project_id}"), None, Some(&contributor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "code": unique_code(), "name": "Not allowed" })),
            Some(&contributor),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_project_code_conflicts() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("dupmgr", UserRole::Manager).await;
    let code = unique_code();
    let body = json!({ "code": code, "name": unique("site") });

    let response = app
        .request("POST", "/api/projects", Some(body.clone()), Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let response = app
        .request("POST", "/api/projects", Some(body), Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}
