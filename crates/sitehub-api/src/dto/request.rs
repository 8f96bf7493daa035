//! Request DTOs with validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sitehub_entity::Priority;
use sitehub_entity::calendar::UpdateCalendarEvent;
use sitehub_entity::comment::CommentTarget;
use sitehub_entity::document::{DocumentChanges, DocumentStatus};
use sitehub_entity::issue::{IssueStatus, UpdateIssue};
use sitehub_entity::project::{ProjectStatus, UpdateProject};
use sitehub_entity::task::{TaskStatus, UpdateTask};
use sitehub_entity::user::{UpdateUser, UserRole, UserStatus};
use sitehub_service::calendar::CreateEventRequest as SvcCreateEvent;
use sitehub_service::comment::CreateCommentRequest as SvcCreateComment;
use sitehub_service::document::{
    CertifyRequest as SvcCertify, CreateDocumentRequest as SvcCreateDocument,
};
use sitehub_service::issue::CreateIssueRequest as SvcCreateIssue;
use sitehub_service::project::CreateProjectRequest as SvcCreateProject;
use sitehub_service::task::CreateTaskRequest as SvcCreateTask;
use sitehub_service::user::{
    CreateUserRequest as SvcCreateUser, RegisterRequest as SvcRegister,
};

// ── Auth ─────────────────────────────────────────────────────────────

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Email.
    #[validate(email)]
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 200))]
    pub display_name: Option<String>,
}

impl From<RegisterRequest> for SvcRegister {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            display_name: req.display_name,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Email.
    #[validate(email)]
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 200))]
    pub display_name: Option<String>,
    /// Role.
    pub role: UserRole,
}

impl From<CreateUserRequest> for SvcCreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            display_name: req.display_name,
            role: req.role,
        }
    }
}

/// Update user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// Email.
    #[validate(email)]
    pub email: Option<String>,
    /// Display name.
    #[validate(length(max = 200))]
    pub display_name: Option<String>,
    /// Role.
    pub role: Option<UserRole>,
    /// Account status.
    pub status: Option<UserStatus>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            display_name: req.display_name,
            role: req.role,
            status: req.status,
        }
    }
}

// ── Projects ─────────────────────────────────────────────────────────

/// Create project request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Short project code used in container names.
    #[validate(length(min = 2, max = 12))]
    pub code: String,
    /// Project name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Initial status.
    pub status: Option<ProjectStatus>,
    /// Site location.
    pub location: Option<String>,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned end.
    pub end_date: Option<NaiveDate>,
}

impl From<CreateProjectRequest> for SvcCreateProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            status: req.status,
            location: req.location,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Update project request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Status.
    pub status: Option<ProjectStatus>,
    /// Site location.
    pub location: Option<String>,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned end.
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateProjectRequest> for UpdateProject {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            status: req.status,
            location: req.location,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

// ── Documents ────────────────────────────────────────────────────────

/// Register a document whose file is already reachable at `url`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Document name.
    #[validate(length(min = 1, max = 500))]
    pub name: String,
    /// File location.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    /// Initial version (default 1).
    #[validate(range(min = 1))]
    pub version: Option<i32>,
    /// Initial status (default WIP).
    pub status: Option<DocumentStatus>,
    /// Category.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// ISO 19650 metadata object.
    pub metadata: Option<serde_json::Value>,
}

impl From<CreateDocumentRequest> for SvcCreateDocument {
    fn from(req: CreateDocumentRequest) -> Self {
        Self {
            project_id: req.project_id,
            name: req.name,
            url: req.url,
            version: req.version,
            status: req.status,
            category: req.category,
            metadata: req.metadata,
        }
    }
}

/// Partial document update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    /// Document name.
    #[validate(length(min = 1, max = 500))]
    pub name: Option<String>,
    /// File location.
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,
    /// Version number.
    #[validate(range(min = 1))]
    pub version: Option<i32>,
    /// Status.
    pub status: Option<DocumentStatus>,
    /// Category.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// ISO 19650 metadata object (replaces the stored object).
    pub metadata: Option<serde_json::Value>,
}

impl From<UpdateDocumentRequest> for DocumentChanges {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            name: req.name,
            url: req.url,
            version: req.version,
            status: req.status,
            category: req.category,
            metadata: req.metadata,
        }
    }
}

/// Restore a document from a history entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestoreRequest {
    /// History row to restore from.
    pub history_id: Uuid,
}

/// Certification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CertifyRequest {
    /// Certification kind.
    #[validate(length(min = 1, max = 100))]
    pub certification_type: String,
    /// Notes.
    pub notes: Option<String>,
}

impl From<CertifyRequest> for SvcCertify {
    fn from(req: CertifyRequest) -> Self {
        Self {
            certification_type: req.certification_type,
            notes: req.notes,
        }
    }
}

// ── Tasks ────────────────────────────────────────────────────────────

/// Create task request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Title.
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Initial status.
    pub status: Option<TaskStatus>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

impl From<CreateTaskRequest> for SvcCreateTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            project_id: req.project_id,
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        }
    }
}

/// Update task request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// Title.
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Status.
    pub status: Option<TaskStatus>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

impl From<UpdateTaskRequest> for UpdateTask {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id,
            due_date: req.due_date,
        }
    }
}

// ── Issues ───────────────────────────────────────────────────────────

/// Create issue request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIssueRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Related document.
    pub document_id: Option<Uuid>,
    /// Title.
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
}

impl From<CreateIssueRequest> for SvcCreateIssue {
    fn from(req: CreateIssueRequest) -> Self {
        Self {
            project_id: req.project_id,
            document_id: req.document_id,
            title: req.title,
            description: req.description,
            priority: req.priority,
            assignee_id: req.assignee_id,
        }
    }
}

/// Update issue request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateIssueRequest {
    /// Title.
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Status.
    pub status: Option<IssueStatus>,
    /// Priority.
    pub priority: Option<Priority>,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
}

impl From<UpdateIssueRequest> for UpdateIssue {
    fn from(req: UpdateIssueRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assignee_id: req.assignee_id,
        }
    }
}

// ── Calendar ─────────────────────────────────────────────────────────

/// Create calendar event request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Title.
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start instant.
    pub starts_at: DateTime<Utc>,
    /// End instant.
    pub ends_at: DateTime<Utc>,
    /// Whole-day event.
    #[serde(default)]
    pub all_day: bool,
}

impl From<CreateEventRequest> for SvcCreateEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            project_id: req.project_id,
            title: req.title,
            description: req.description,
            location: req.location,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            all_day: req.all_day,
        }
    }
}

/// Update calendar event request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    /// Title.
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start instant.
    pub starts_at: Option<DateTime<Utc>>,
    /// End instant.
    pub ends_at: Option<DateTime<Utc>>,
    /// Whole-day event.
    pub all_day: Option<bool>,
}

impl From<UpdateEventRequest> for UpdateCalendarEvent {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            location: req.location,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            all_day: req.all_day,
        }
    }
}

// ── Comments ─────────────────────────────────────────────────────────

/// Create comment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Kind of entity commented on.
    pub target_type: CommentTarget,
    /// Entity ID.
    pub target_id: Uuid,
    /// Comment text.
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
}

impl From<CreateCommentRequest> for SvcCreateComment {
    fn from(req: CreateCommentRequest) -> Self {
        Self {
            target_type: req.target_type,
            target_id: req.target_id,
            body: req.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_project_code_fails_validation() {
        let req: CreateProjectRequest =
            serde_json::from_str(r#"{"code":"T","name":"Tower"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_document_status_accepts_wire_names() {
        let req: UpdateDocumentRequest =
            serde_json::from_str(r#"{"status":"Published"}"#).unwrap();
        assert_eq!(req.status, Some(DocumentStatus::Published));
        let wip: UpdateDocumentRequest = serde_json::from_str(r#"{"status":"WIP"}"#).unwrap();
        assert_eq!(wip.status, Some(DocumentStatus::Wip));
    }

    #[test]
    fn test_zero_version_is_rejected() {
        let req: UpdateDocumentRequest = serde_json::from_str(r#"{"version":0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","email":"not-an-email","password":"x"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_comment_is_rejected() {
        let req = CreateCommentRequest {
            target_type: CommentTarget::Task,
            target_id: Uuid::new_v4(),
            body: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
