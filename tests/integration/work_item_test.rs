//! Integration tests for tasks, issues, calendar events, comments and activity.

use axum::http::StatusCode;
use serde_json::json;

use sitehub_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_task_lifecycle() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("taskmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({
                "project_id": project_id,
                "title": "Install formwork",
                "priority": "high",
                "due_date": "2030-03-01",
            })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "todo");
    let id = response.body["id"].as_str().expect("task id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(json!({ "status": "in_progress" })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "in_progress");

    let response = app
        .request(
            "GET",
            &format!("/api/tasks?project_id={project_id}&status=in_progress"),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_items"], 1);

    let response = app
        .request("DELETE", &format!("/api/tasks/{id}"), None, Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/tasks/{id}"), None, Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_issue_resolution_is_stamped() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let contributor = app.token_for("issuecontrib", UserRole::Contributor).await;
    let manager = app.token_for("issuemgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .request(
            "POST",
            "/api/issues",
            Some(json!({ "project_id": project_id, "title": "Clash between duct and beam" })),
            Some(&contributor),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "open");
    assert!(response.body["resolved_at"].is_null());
    let id = response.body["id"].as_str().expect("issue id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/issues/{id}"),
            Some(json!({ "status": "resolved" })),
            Some(&contributor),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["resolved_at"].is_string());

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/summary"),
            None,
            Some(&contributor),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["open_issues"], 0);
    assert_eq!(response.body["documents_by_status"]["WIP"], 0);
}

#[tokio::test]
async fn test_calendar_events_window() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("calmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .request(
            "POST",
            "/api/calendar/events",
            Some(json!({
                "project_id": project_id,
                "title": "Concrete pour",
                "starts_at": "2030-05-01T07:00:00Z",
                "ends_at": "2030-05-01T15:00:00Z",
            })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["all_day"], false);

    let response = app
        .request(
            "POST",
            "/api/calendar/events",
            Some(json!({
                "project_id": project_id,
                "title": "Backwards",
                "starts_at": "2030-05-02T15:00:00Z",
                "ends_at": "2030-05-02T07:00:00Z",
            })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "GET",
            &format!(
                "/api/calendar/events?project_id={project_id}&from=2030-04-30T00:00:00Z&to=2030-05-02T00:00:00Z"
            ),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));

    let response = app
        .request(
            "GET",
            &format!(
                "/api/calendar/events?project_id={project_id}&from=2030-06-01T00:00:00Z&to=2030-07-01T00:00:00Z"
            ),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_comments_on_documents() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("cmtmgr", UserRole::Manager).await;
    let viewer = app.token_for("cmtviewer", UserRole::Viewer).await;
    let other = app.token_for("cmtother", UserRole::Viewer).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({
                "project_id": project_id,
                "name": "section-a.pdf",
                "url": "https://files.example.test/section-a.pdf",
            })),
            Some(&manager),
        )
        .await;
    let doc_id = response.body["id"].as_str().expect("document id").to_string();

    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({ "target_type": "document", "target_id": doc_id, "body": "Check gridline C" })),
            Some(&viewer),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let comment_id = response.body["id"].as_str().expect("comment id").to_string();

    let response = app
        .request(
            "GET",
            &format!("/api/comments?target_type=document&target_id={doc_id}"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));

    let response = app
        .request("DELETE", &format!("/api/comments/{comment_id}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/comments/{comment_id}"), None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_comment_on_missing_target() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let viewer = app.token_for("cmtmissing", UserRole::Viewer).await;

    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({
                "target_type": "task",
                "target_id": uuid::Uuid::new_v4(),
                "body": "Anyone?",
            })),
            Some(&viewer),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_activity_log_records_mutations() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("actmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;

    app.request(
        "POST",
        "/api/tasks",
        Some(json!({ "project_id": project_id, "title": "Survey site" })),
        Some(&manager),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/activity-logs?project_id={project_id}"),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let actions: Vec<&str> = response.body["items"]
        .as_array()
        .expect("activity items")
        .iter()
        .filter_map(|a| a["action"].as_str())
        .collect();
    assert!(actions.contains(&"task.create"), "{actions:?}");
    assert!(actions.contains(&"project.create"), "{actions:?}");
}
