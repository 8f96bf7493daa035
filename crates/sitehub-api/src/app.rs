//! Application builder: wires repositories, services and the router.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use sitehub_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, RbacEnforcer};
use sitehub_core::config::AppConfig;
use sitehub_core::error::AppError;
use sitehub_core::traits::{EventPublisher, StorageProvider};
use sitehub_database::DatabasePool;
use sitehub_database::repositories::{
    ActivityLogRepository, CalendarRepository, CommentRepository, DocumentRepository,
    IssueRepository, ProjectRepository, TaskRepository, UserRepository,
};
use sitehub_database::store::{
    ActivityStore, CalendarStore, CommentStore, DocumentStore, IssueStore, TaskStore,
};
use sitehub_realtime::RealtimeHub;
use sitehub_service::{
    ActivityRecorder, ActivityService, AdminUserService, AuthService, CalendarService,
    CommentService, DocumentService, IssueService, ProjectService, TaskService,
};
use sitehub_storage::LocalStorageProvider;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Constructs every repository and service on top of a database pool.
pub async fn build_state(config: AppConfig, db: DatabasePool) -> Result<AppState, AppError> {
    // ── Step 1: Storage ──────────────────────────────────────────
    let uploads_dir = config.storage.uploads_dir();
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&uploads_dir).await?);
    info!(path = %uploads_dir.display(), "Upload storage ready");

    // ── Step 2: Repositories ─────────────────────────────────────
    let pool = db.pg();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(pool.clone()));
    let task_repo: Arc<dyn TaskStore> = Arc::new(TaskRepository::new(pool.clone()));
    let issue_repo: Arc<dyn IssueStore> = Arc::new(IssueRepository::new(pool.clone()));
    let calendar_repo: Arc<dyn CalendarStore> = Arc::new(CalendarRepository::new(pool.clone()));
    let comment_repo: Arc<dyn CommentStore> = Arc::new(CommentRepository::new(pool.clone()));
    let documents: Arc<dyn DocumentStore> = Arc::new(DocumentRepository::new(pool.clone()));
    let activity_store: Arc<dyn ActivityStore> = Arc::new(ActivityLogRepository::new(pool));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let rbac = Arc::new(RbacEnforcer::new());

    // ── Step 4: Realtime ─────────────────────────────────────────
    let realtime = Arc::new(RealtimeHub::new(config.realtime.clone()));
    let events: Arc<dyn EventPublisher> = realtime.clone();

    // ── Step 5: Services ─────────────────────────────────────────
    let activity = ActivityRecorder::new(activity_store.clone());

    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        hasher.clone(),
        validator.clone(),
        jwt_encoder,
        activity.clone(),
        config.auth.allow_registration,
    ));
    let admin_user_service = Arc::new(AdminUserService::new(
        user_repo,
        hasher,
        validator,
        rbac.clone(),
        activity.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(
        project_repo,
        documents.clone(),
        rbac.clone(),
        activity.clone(),
    ));
    let document_service = Arc::new(DocumentService::new(
        documents.clone(),
        storage.clone(),
        activity.clone(),
        events.clone(),
        rbac.clone(),
        config.storage.max_upload_size_bytes,
    ));
    let task_service = Arc::new(TaskService::new(
        task_repo.clone(),
        events.clone(),
        rbac.clone(),
        activity.clone(),
    ));
    let issue_service = Arc::new(IssueService::new(
        issue_repo.clone(),
        events.clone(),
        rbac.clone(),
        activity.clone(),
    ));
    let calendar_service = Arc::new(CalendarService::new(
        calendar_repo,
        events.clone(),
        rbac.clone(),
        activity.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(
        comment_repo,
        documents,
        task_repo,
        issue_repo,
        events,
        rbac.clone(),
        activity,
    ));
    let activity_service = Arc::new(ActivityService::new(activity_store, rbac));

    Ok(AppState {
        config: Arc::new(config),
        db,
        storage,
        realtime,
        jwt_decoder,
        auth_service,
        admin_user_service,
        project_service,
        document_service,
        task_service,
        issue_service,
        calendar_service,
        comment_service,
        activity_service,
    })
}
