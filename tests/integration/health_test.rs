//! Integration tests for the health endpoint and public routes.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_database() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["ws_connections"], 0);
}

#[tokio::test]
async fn test_missing_upload_is_not_found() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request("GET", "/uploads/does-not-exist.pdf", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ws_requires_token() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/ws", None, None).await;

    assert!(response.status.is_client_error());
}
