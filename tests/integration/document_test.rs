//! Integration tests for the document lifecycle and its history.

use axum::http::StatusCode;
use serde_json::json;

use sitehub_entity::user::UserRole;

use crate::helpers::TestApp;

async fn create_document(app: &TestApp, token: &str, project_id: &str, name: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({
                "project_id": project_id,
                "name": name,
                "url": format!("https://files.example.test/{name}"),
                "category": "Drawings",
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["id"].as_str().expect("document id").to_string()
}

#[tokio::test]
async fn test_create_document_defaults() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("docmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let contributor = app.token_for("doccontrib", UserRole::Contributor).await;

    let id = create_document(&app, &contributor, &project_id, "site-plan.pdf").await;

    let response = app
        .request("GET", &format!("/api/documents/{id}"), None, Some(&contributor))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "WIP");
    assert_eq!(response.body["version"], 1);
    assert_eq!(response.body["project_id"], project_id.as_str());

    let history = app
        .request(
            "GET",
            &format!("/api/documents/{id}/history"),
            None,
            Some(&contributor),
        )
        .await;
    assert_eq!(history.status, StatusCode::OK);
    let entries = history.body.as_array().expect("history array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "upload");
}

#[tokio::test]
async fn test_update_delete_keeps_history() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("histmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let id = create_document(&app, &manager, &project_id, "facade.dwg").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{id}"),
            Some(json!({ "name": "facade-rev-b.dwg", "status": "Shared" })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["name"], "facade-rev-b.dwg");
    assert_eq!(response.body["status"], "Shared");

    let response = app
        .request("DELETE", &format!("/api/documents/{id}"), None, Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["action"], "delete");
    assert_eq!(response.body["name"], "facade-rev-b.dwg");

    let response = app
        .request("GET", &format!("/api/documents/{id}"), None, Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let history = app
        .request("GET", &format!("/api/documents/{id}/history"), None, Some(&manager))
        .await;
    let actions: Vec<&str> = history
        .body
        .as_array()
        .expect("history array")
        .iter()
        .filter_map(|h| h["action"].as_str())
        .collect();
    assert_eq!(actions, vec!["delete", "update", "upload"]);

    let upload_entry = history.body[2]["id"].as_str().expect("history id");
    let response = app
        .request(
            "POST",
            "/api/documents/restore",
            Some(json!({ "history_id": upload_entry })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restore_reverts_name_and_url() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("restmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let id = create_document(&app, &manager, &project_id, "level-02.pdf").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/documents/{id}"),
            Some(json!({ "name": "level-02-v2.pdf", "url": "https://files.example.test/v2", "version": 2 })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let history = app
        .request("GET", &format!("/api/documents/{id}/history"), None, Some(&manager))
        .await;
    let upload_entry = history.body[1]["id"].as_str().expect("history id").to_string();
    assert_eq!(history.body[1]["action"], "upload");

    let response = app
        .request(
            "POST",
            "/api/documents/restore",
            Some(json!({ "history_id": upload_entry })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["name"], "level-02.pdf");
    assert_eq!(response.body["url"], "https://files.example.test/level-02.pdf");
    assert_eq!(response.body["version"], 1);

    let history = app
        .request("GET", &format!("/api/documents/{id}/history"), None, Some(&manager))
        .await;
    let entries = history.body.as_array().expect("history array");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["action"], "restore");
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("emptymgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let id = create_document(&app, &manager, &project_id, "empty.pdf").await;

    let response = app
        .request("PUT", &format!("/api/documents/{id}"), Some(json!({})), Some(&manager))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approve_publishes_document() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("apprmgr", UserRole::Manager).await;
    let contributor = app.token_for("apprcontrib", UserRole::Contributor).await;
    let project_id = app.create_project(&manager).await;
    let id = create_document(&app, &contributor, &project_id, "method-statement.docx").await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{id}/approve"),
            None,
            Some(&contributor),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("POST", &format!("/api/documents/{id}/approve"), None, Some(&manager))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "Published");
}

#[tokio::test]
async fn test_certifications() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("certmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let id = create_document(&app, &manager, &project_id, "fire-strategy.pdf").await;

    let response = app
        .request(
            "POST",
            &format!("/api/documents/{id}/certifications"),
            Some(json!({ "certification_type": "Fire safety", "notes": "Reviewed" })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{id}/certifications"),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let certs = response.body.as_array().expect("certifications array");
    assert_eq!(certs.len(), 1);
    assert_eq!(certs[0]["certification_type"], "Fire safety");
}

#[tokio::test]
async fn test_container_name_uses_project_code() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("isomgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let project = app
        .request("GET", &format!("/api/projects/{project_id}"), None, Some(&manager))
        .await;
    let code = project.body["code"].as_str().expect("project code").to_string();

    let response = app
        .request(
            "POST",
            "/api/documents",
            Some(json!({
                "project_id": project_id,
                "name": "ground-floor.pdf",
                "url": "https://files.example.test/gf.pdf",
                "metadata": {
                    "originator": "arc",
                    "volume": "ZZ",
                    "level": "00",
                    "type": "DR",
                    "role": "A",
                    "number": "0001",
                },
            })),
            Some(&manager),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(
        response.body["container_name"],
        format!("{code}-ARC-ZZ-00-DR-A-0001").as_str()
    );
}

#[tokio::test]
async fn test_list_filters_by_project_and_status() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("listmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;
    let first = create_document(&app, &manager, &project_id, "a.pdf").await;
    create_document(&app, &manager, &project_id, "b.pdf").await;

    app.request("POST", &format!("/api/documents/{first}/approve"), None, Some(&manager))
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents?project_id={project_id}"),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_items"], 2);

    let response = app
        .request(
            "GET",
            &format!("/api/documents?project_id={project_id}&status=Published"),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_items"], 1);
    assert_eq!(response.body["items"][0]["id"], first.as_str());
}

#[tokio::test]
async fn test_upload_and_revision() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("upmgr", UserRole::Manager).await;
    let project_id = app.create_project(&manager).await;

    let response = app
        .upload(
            "/api/documents/upload",
            &[("project_id", project_id.as_str()), ("category", "Models")],
            "core.ifc",
            b"ISO-10303-21;",
            &manager,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["name"], "core.ifc");
    assert_eq!(response.body["version"], 1);
    let id = response.body["id"].as_str().expect("document id").to_string();
    let url = response.body["url"].as_str().expect("url").to_string();
    assert!(url.starts_with("/uploads/"));

    let served = app.request("GET", &url, None, None).await;
    assert_eq!(served.status, StatusCode::OK);

    let response = app
        .upload(
            &format!("/api/documents/{id}/revisions"),
            &[],
            "core-v2.ifc",
            b"ISO-10303-21; rev",
            &manager,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["version"], 2);
    assert_ne!(response.body["url"], url.as_str());
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let manager = app.token_for("nofile", UserRole::Manager).await;

    let response = app
        .request("POST", "/api/documents/upload", None, Some(&manager))
        .await;

    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_malformed_document_id_is_json_bad_request() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let viewer = app.token_for("docbadid", UserRole::Viewer).await;

    let response = app
        .request("GET", "/api/documents/not-a-uuid", None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");
    assert!(response.body["error"].is_string());
}
