//! Route definitions for the SiteHub HTTP API.
//!
//! All JSON routes are mounted under `/api`; the WebSocket endpoint and
//! stored uploads sit at the root.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(project_routes())
        .merge(document_routes())
        .merge(task_routes())
        .merge(issue_routes())
        .merge(calendar_routes())
        .merge(comment_routes())
        .merge(activity_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .route("/ws", get(handlers::ws::ws_upgrade))
        .route("/uploads/{*key}", get(handlers::uploads::serve_upload))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(request_timeout(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Aborts requests that run past `timeout` with 408.
fn request_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Login, self-registration, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin user management and the role table
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/roles", get(handlers::users::list_roles))
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project)
                .put(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route(
            "/projects/{id}/summary",
            get(handlers::projects::project_summary),
        )
}

/// Documents, uploads, history, restore, approval, certifications
fn document_routes() -> Router<AppState> {
    use handlers::documents as docs;

    Router::new()
        .route(
            "/documents",
            get(docs::list_documents).post(docs::create_document),
        )
        .route("/documents/upload", post(docs::upload_document))
        .route("/documents/restore", post(docs::restore_document))
        .route(
            "/documents/{id}",
            get(docs::get_document)
                .put(docs::update_document)
                .delete(docs::delete_document),
        )
        .route("/documents/{id}/history", get(docs::document_history))
        .route("/documents/{id}/revisions", post(docs::upload_revision))
        .route("/documents/{id}/approve", post(docs::approve_document))
        .route(
            "/documents/{id}/certifications",
            get(docs::list_certifications).post(docs::add_certification),
        )
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
}

fn issue_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/issues",
            get(handlers::issues::list_issues).post(handlers::issues::create_issue),
        )
        .route(
            "/issues/{id}",
            get(handlers::issues::get_issue)
                .put(handlers::issues::update_issue)
                .delete(handlers::issues::delete_issue),
        )
}

fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/calendar/events",
            get(handlers::calendar::list_events).post(handlers::calendar::create_event),
        )
        .route(
            "/calendar/events/{id}",
            get(handlers::calendar::get_event)
                .put(handlers::calendar::update_event)
                .delete(handlers::calendar::delete_event),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/comments/{id}",
            axum::routing::delete(handlers::comments::delete_comment),
        )
}

fn activity_routes() -> Router<AppState> {
    Router::new().route("/activity-logs", get(handlers::activity::list_activity))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_request_times_out_with_408() {
        let app: Router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "done"
                }),
            )
            .layer(request_timeout(Duration::from_secs(1)));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
