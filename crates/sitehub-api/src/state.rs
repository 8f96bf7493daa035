//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sitehub_auth::JwtDecoder;
use sitehub_core::config::AppConfig;
use sitehub_core::traits::StorageProvider;
use sitehub_database::DatabasePool;
use sitehub_realtime::RealtimeHub;
use sitehub_service::{
    ActivityService, AdminUserService, AuthService, CalendarService, CommentService,
    DocumentService, IssueService, ProjectService, TaskService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Uploaded file storage
    pub storage: Arc<dyn StorageProvider>,
    /// WebSocket broadcast hub
    pub realtime: Arc<RealtimeHub>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Login, registration, current user
    pub auth_service: Arc<AuthService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
    /// Projects
    pub project_service: Arc<ProjectService>,
    /// Documents, history, certifications
    pub document_service: Arc<DocumentService>,
    /// Tasks
    pub task_service: Arc<TaskService>,
    /// Issues
    pub issue_service: Arc<IssueService>,
    /// Calendar events
    pub calendar_service: Arc<CalendarService>,
    /// Comments
    pub comment_service: Arc<CommentService>,
    /// Activity log queries
    pub activity_service: Arc<ActivityService>,
}
