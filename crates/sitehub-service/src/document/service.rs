//! Document lifecycle operations.
//!
//! Every mutation goes through the [`DocumentStore`], which writes the live
//! row and appends exactly one history row. The service adds permission
//! checks, the activity log entry and realtime events on top.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::events::EventName;
use sitehub_core::traits::{EventPublisher, StorageProvider};
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_database::store::{DocumentFilter, DocumentStore, Recorded};
use sitehub_entity::activity::NewActivity;
use sitehub_entity::document::{
    Certification, Document, DocumentChanges, DocumentHistory, DocumentStatus, NewCertification,
    NewDocument,
};
use sitehub_storage::keys::{UploadKey, public_url};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::notify;

use super::upload::{FilePart, UploadDocumentRequest};
use super::view::DocumentView;

/// Request to register a document by URL.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateDocumentRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Storage URL.
    pub url: String,
    /// Initial version; defaults to 1.
    pub version: Option<i32>,
    /// Initial status; defaults to WIP.
    pub status: Option<DocumentStatus>,
    /// Free-text category.
    pub category: Option<String>,
    /// Metadata bag.
    pub metadata: Option<serde_json::Value>,
}

/// Request to certify a document.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CertifyRequest {
    /// Certification type, e.g. `"fire-safety"`.
    pub certification_type: String,
    /// Notes.
    pub notes: Option<String>,
}

/// Manages documents, their history and certifications.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Live rows, history and certifications.
    store: Arc<dyn DocumentStore>,
    /// Uploaded file storage.
    storage: Arc<dyn StorageProvider>,
    /// Activity log.
    activity: ActivityRecorder,
    /// Realtime notifier.
    events: Arc<dyn EventPublisher>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// Upload size limit.
    max_upload_bytes: u64,
}

fn validate_metadata(metadata: &serde_json::Value) -> Result<(), AppError> {
    if metadata.is_object() {
        Ok(())
    } else {
        Err(AppError::validation("metadata must be a JSON object"))
    }
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        storage: Arc<dyn StorageProvider>,
        activity: ActivityRecorder,
        events: Arc<dyn EventPublisher>,
        rbac: Arc<RbacEnforcer>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            store,
            storage,
            activity,
            events,
            rbac,
            max_upload_bytes,
        }
    }

    async fn view(&self, document: Document) -> Result<DocumentView, AppError> {
        let code = match document.project_id {
            Some(pid) => self.store.project_code(pid).await?,
            None => None,
        };
        Ok(DocumentView::new(document, code.as_deref()))
    }

    async fn load(&self, id: Uuid) -> Result<Document, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    async fn record(&self, ctx: &RequestContext, action: &str, rec: &Recorded) {
        self.activity
            .record(
                NewActivity::new(ctx.user_id, action, "document", rec.document.id)
                    .in_project(rec.document.project_id)
                    .with_details(serde_json::json!({
                        "history_id": rec.history.id,
                        "version": rec.document.version,
                        "status": rec.document.status,
                    })),
            )
            .await;
    }

    async fn store_file(&self, file: &FilePart) -> Result<UploadKey, AppError> {
        if file.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if file.data.len() as u64 > self.max_upload_bytes {
            return Err(AppError::payload_too_large(format!(
                "File exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }
        let key = UploadKey::generate(&file.file_name);
        self.storage.write(key.as_str(), file.data.clone()).await?;
        Ok(key)
    }

    async fn discard_file(&self, key: &UploadKey) {
        if let Err(e) = self.storage.delete(key.as_str()).await {
            warn!(key = %key, error = %e, "Failed to remove orphaned upload");
        }
    }

    /// Lists documents, most recently updated first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &DocumentFilter,
        page: PageRequest,
    ) -> Result<PageResponse<DocumentView>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;

        let documents = self.store.list(filter, &page).await?;
        let mut codes: HashMap<Uuid, Option<String>> = HashMap::new();
        for pid in documents.items.iter().filter_map(|d| d.project_id) {
            if !codes.contains_key(&pid) {
                codes.insert(pid, self.store.project_code(pid).await?);
            }
        }

        Ok(documents.map(|doc| {
            let code = doc
                .project_id
                .and_then(|pid| codes.get(&pid).cloned().flatten());
            DocumentView::new(doc, code.as_deref())
        }))
    }

    /// Gets one document.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        let document = self.load(id).await?;
        self.view(document).await
    }

    /// Registers a document. Appends an `upload` history row and emits
    /// `document:new`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateDocumentRequest,
    ) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentWrite)?;
        require_text(&req.name, "name")?;
        require_text(&req.url, "url")?;
        let metadata = req.metadata.unwrap_or_else(|| serde_json::json!({}));
        validate_metadata(&metadata)?;

        let rec = self
            .store
            .create(
                NewDocument {
                    project_id: req.project_id,
                    name: req.name.trim().to_string(),
                    url: req.url,
                    version: req.version.unwrap_or(1),
                    status: req.status.unwrap_or_default(),
                    category: req.category,
                    uploaded_by: Some(ctx.user_id),
                    metadata,
                },
                Some(ctx.user_id),
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %rec.document.id,
            name = %rec.document.name,
            "Document created"
        );

        self.record(ctx, "document.upload", &rec).await;
        let view = self.view(rec.document).await?;
        notify::publish(self.events.as_ref(), EventName::DocumentNew, ctx.user_id, &view);
        Ok(view)
    }

    /// Stores an uploaded file and registers it as a new document.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadDocumentRequest,
    ) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentWrite)?;

        let key = self.store_file(&req.file).await?;
        let name = req
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| req.file.file_name.clone());

        let result = self
            .create(
                ctx,
                CreateDocumentRequest {
                    project_id: req.project_id,
                    name,
                    url: public_url(&key),
                    version: Some(1),
                    status: req.status,
                    category: req.category,
                    metadata: req.metadata,
                },
            )
            .await;

        if result.is_err() {
            self.discard_file(&key).await;
        }
        result
    }

    /// Applies a partial update and appends an `update` history row.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: DocumentChanges,
    ) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentWrite)?;
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(name) = &changes.name {
            require_text(name, "name")?;
        }
        if let Some(url) = &changes.url {
            require_text(url, "url")?;
        }
        if let Some(metadata) = &changes.metadata {
            validate_metadata(metadata)?;
        }

        let rec = self.store.update(id, &changes, Some(ctx.user_id)).await?;
        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            version = rec.document.version,
            "Document updated"
        );

        self.record(ctx, "document.update", &rec).await;
        self.view(rec.document).await
    }

    /// Stores a new file for an existing document and bumps its version.
    pub async fn upload_revision(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        file: FilePart,
    ) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentWrite)?;
        let current = self.load(id).await?;
        let next_version = current
            .version
            .checked_add(1)
            .ok_or_else(|| AppError::validation("Version limit reached"))?;

        let key = self.store_file(&file).await?;
        let changes = DocumentChanges {
            url: Some(public_url(&key)),
            version: Some(next_version),
            ..Default::default()
        };

        let rec = match self.store.update(id, &changes, Some(ctx.user_id)).await {
            Ok(rec) => rec,
            Err(e) => {
                self.discard_file(&key).await;
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            version = rec.document.version,
            "Document revision uploaded"
        );

        self.record(ctx, "document.revision", &rec).await;
        self.view(rec.document).await
    }

    /// Deletes a document. The `delete` history row is written first and
    /// survives the live row.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<DocumentHistory, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentDelete)?;
        let project_id = self.load(id).await?.project_id;

        let history = self.store.delete(id, Some(ctx.user_id)).await?;
        info!(user_id = %ctx.user_id, document_id = %id, "Document deleted");

        self.activity
            .record(
                NewActivity::new(ctx.user_id, "document.delete", "document", id)
                    .in_project(project_id)
                    .with_details(serde_json::json!({
                        "history_id": history.id,
                        "name": history.name,
                    })),
            )
            .await;
        Ok(history)
    }

    /// History of a document, newest first. Available after deletion.
    pub async fn history(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<DocumentHistory>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        let history = self.store.history(id).await?;
        if history.is_empty() && self.store.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        Ok(history)
    }

    /// Copies name, URL and version from a history entry back onto the live
    /// document and appends a `restore` row.
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        history_id: Uuid,
    ) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentRestore)?;

        let rec = self.store.restore(history_id, Some(ctx.user_id)).await?;
        info!(
            user_id = %ctx.user_id,
            document_id = %rec.document.id,
            history_id = %history_id,
            version = rec.document.version,
            "Document restored"
        );

        self.record(ctx, "document.restore", &rec).await;
        self.view(rec.document).await
    }

    /// Marks a document Published and emits `document:approved`.
    pub async fn approve(&self, ctx: &RequestContext, id: Uuid) -> Result<DocumentView, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentApprove)?;

        let changes = DocumentChanges {
            status: Some(DocumentStatus::Published),
            ..Default::default()
        };
        let rec = self.store.update(id, &changes, Some(ctx.user_id)).await?;
        info!(user_id = %ctx.user_id, document_id = %id, "Document approved");

        self.record(ctx, "document.approve", &rec).await;
        let view = self.view(rec.document).await?;
        notify::publish(
            self.events.as_ref(),
            EventName::DocumentApproved,
            ctx.user_id,
            &view,
        );
        Ok(view)
    }

    /// Records a certification against a document.
    pub async fn add_certification(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: CertifyRequest,
    ) -> Result<Certification, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::DocumentCertify)?;
        require_text(&req.certification_type, "certification_type")?;
        let project_id = self.load(id).await?.project_id;

        let certification = self
            .store
            .add_certification(NewCertification {
                document_id: id,
                certification_type: req.certification_type.trim().to_string(),
                notes: req.notes,
                certified_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %id,
            certification = %certification.certification_type,
            "Document certified"
        );

        self.activity
            .record(
                NewActivity::new(ctx.user_id, "document.certify", "document", id)
                    .in_project(project_id)
                    .with_details(serde_json::json!({
                        "certification_id": certification.id,
                        "certification_type": certification.certification_type,
                    })),
            )
            .await;
        Ok(certification)
    }

    /// Certifications of a document, newest first.
    pub async fn certifications(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<Certification>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.load(id).await?;
        self.store.certifications(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;
    use sitehub_core::error::ErrorKind;
    use sitehub_core::events::DomainEvent;
    use sitehub_database::store::{ActivityStore, MemoryActivityStore, MemoryDocumentStore};
    use sitehub_entity::activity::ActivityFilter;
    use sitehub_entity::document::HistoryAction;
    use sitehub_entity::user::UserRole;
    use sitehub_storage::LocalStorageProvider;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl RecordingPublisher {
        fn names(&self) -> Vec<EventName> {
            self.events.lock().unwrap().iter().map(|e| e.name).collect()
        }
    }

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: DomainEvent) -> usize {
            self.events.lock().unwrap().push(event);
            1
        }
    }

    struct Fixture {
        service: DocumentService,
        store: Arc<MemoryDocumentStore>,
        activity: Arc<MemoryActivityStore>,
        events: Arc<RecordingPublisher>,
        dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorageProvider::new(dir.path()).await.unwrap());
        let store = Arc::new(MemoryDocumentStore::new());
        let activity = Arc::new(MemoryActivityStore::new());
        let events = Arc::new(RecordingPublisher::default());
        let service = DocumentService::new(
            store.clone(),
            storage,
            ActivityRecorder::new(activity.clone()),
            events.clone(),
            Arc::new(RbacEnforcer::new()),
            1024,
        );
        Fixture {
            service,
            store,
            activity,
            events,
            dir,
        }
    }

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), "site.engineer", role)
    }

    fn request(name: &str) -> CreateDocumentRequest {
        CreateDocumentRequest {
            project_id: None,
            name: name.into(),
            url: format!("/uploads/{name}.pdf"),
            version: None,
            status: None,
            category: Some("Drawing".into()),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_single_upload_row() {
        let f = fixture().await;
        let view = f
            .service
            .create(&ctx(UserRole::Contributor), request("GA plan"))
            .await
            .unwrap();

        assert_eq!(view.document.version, 1);
        assert_eq!(view.document.status, DocumentStatus::Wip);

        let history = f.store.history(view.document.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, HistoryAction::Upload);
        assert_eq!(f.events.names(), vec![EventName::DocumentNew]);
        assert_eq!(f.activity.len().await, 1);
    }

    #[tokio::test]
    async fn test_viewer_cannot_create() {
        let f = fixture().await;
        let err = f
            .service
            .create(&ctx(UserRole::Viewer), request("GA plan"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(f.activity.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_appends_row_and_keeps_prior_rows() {
        let f = fixture().await;
        let user = ctx(UserRole::Contributor);
        let id = f.service.create(&user, request("plan")).await.unwrap().document.id;
        let before = f.store.history(id).await.unwrap();

        let view = f
            .service
            .update(
                &user,
                id,
                DocumentChanges {
                    version: Some(0),
                    status: Some(DocumentStatus::Shared),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(view.document.version, 0);

        let after = f.store.history(id).await.unwrap();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].action, HistoryAction::Update);
        assert_eq!(after[0].status, DocumentStatus::Shared);
        assert_eq!(after[1].id, before[0].id);
        assert_eq!(after[1].version, before[0].version);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let f = fixture().await;
        let user = ctx(UserRole::Contributor);
        let id = f.service.create(&user, request("plan")).await.unwrap().document.id;
        let err = f
            .service
            .update(&user, id, DocumentChanges::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_restore_copies_snapshot() {
        let f = fixture().await;
        let user = ctx(UserRole::Manager);
        let id = f.service.create(&user, request("v1")).await.unwrap().document.id;
        let original = f.store.history(id).await.unwrap()[0].clone();

        f.service
            .update(
                &user,
                id,
                DocumentChanges {
                    name: Some("v2".into()),
                    url: Some("/uploads/v2.pdf".into()),
                    version: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let view = f.service.restore(&user, original.id).await.unwrap();
        assert_eq!(view.document.name, "v1");
        assert_eq!(view.document.url, original.url);
        assert_eq!(view.document.version, 1);

        let history = f.service.history(&user, id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].action, HistoryAction::Restore);
    }

    #[tokio::test]
    async fn test_delete_then_restore_is_not_found() {
        let f = fixture().await;
        let user = ctx(UserRole::Manager);
        let id = f.service.create(&user, request("plan")).await.unwrap().document.id;
        let upload_row = f.store.history(id).await.unwrap()[0].id;

        let row = f.service.delete(&user, id).await.unwrap();
        assert_eq!(row.action, HistoryAction::Delete);
        assert_eq!(
            f.service.get(&user, id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );

        let history = f.service.history(&user, id).await.unwrap();
        assert_eq!(history.len(), 2);

        let err = f.service.restore(&user, upload_row).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_contributor_cannot_delete() {
        let f = fixture().await;
        let user = ctx(UserRole::Contributor);
        let id = f.service.create(&user, request("plan")).await.unwrap().document.id;
        let err = f.service.delete(&user, id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_approve_publishes() {
        let f = fixture().await;
        let manager = ctx(UserRole::Manager);
        let id = f.service.create(&manager, request("plan")).await.unwrap().document.id;

        let view = f.service.approve(&manager, id).await.unwrap();
        assert_eq!(view.document.status, DocumentStatus::Published);
        assert_eq!(
            f.events.names(),
            vec![EventName::DocumentNew, EventName::DocumentApproved]
        );
        let history = f.store.history(id).await.unwrap();
        assert_eq!(history[0].action, HistoryAction::Update);
    }

    #[tokio::test]
    async fn test_upload_and_revision() {
        let f = fixture().await;
        let user = ctx(UserRole::Contributor);
        let view = f
            .service
            .upload(
                &user,
                UploadDocumentRequest {
                    file: FilePart {
                        file_name: "level 1.pdf".into(),
                        data: Bytes::from_static(b"%PDF-1.7"),
                    },
                    name: None,
                    project_id: None,
                    status: None,
                    category: None,
                    metadata: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(view.document.name, "level 1.pdf");
        assert!(view.document.url.starts_with("/uploads/"));
        assert!(view.document.url.ends_with("/level_1.pdf"));

        let revised = f
            .service
            .upload_revision(
                &user,
                view.document.id,
                FilePart {
                    file_name: "level 1 rev B.pdf".into(),
                    data: Bytes::from_static(b"%PDF-1.7 B"),
                },
            )
            .await
            .unwrap();
        assert_eq!(revised.document.version, 2);
        assert_ne!(revised.document.url, view.document.url);
    }

    fn stored_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .flatten()
                    .map(|e| {
                        let path = e.path();
                        if path.is_dir() { stored_files(&path) } else { 1 }
                    })
                    .sum()
            })
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_revision_at_version_limit_is_rejected() {
        let f = fixture().await;
        let user = ctx(UserRole::Contributor);
        let mut req = request("as-built");
        req.version = Some(i32::MAX);
        let id = f.service.create(&user, req).await.unwrap().document.id;

        let err = f
            .service
            .upload_revision(
                &user,
                id,
                FilePart {
                    file_name: "as-built rev Z.pdf".into(),
                    data: Bytes::from_static(b"%PDF-1.7 Z"),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let doc = f.service.get(&user, id).await.unwrap().document;
        assert_eq!(doc.version, i32::MAX);
        assert_eq!(f.store.history(id).await.unwrap().len(), 1);
        assert_eq!(stored_files(f.dir.path()), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let f = fixture().await;
        let err = f
            .service
            .upload(
                &ctx(UserRole::Contributor),
                UploadDocumentRequest {
                    file: FilePart {
                        file_name: "big.bin".into(),
                        data: Bytes::from(vec![0u8; 2048]),
                    },
                    name: None,
                    project_id: None,
                    status: None,
                    category: None,
                    metadata: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PayloadTooLarge);
    }

    #[tokio::test]
    async fn test_container_name_uses_project_code() {
        let f = fixture().await;
        let project_id = Uuid::new_v4();
        f.store.register_project(project_id, "TWR").await;

        let mut req = request("tower plan");
        req.project_id = Some(project_id);
        req.metadata = Some(serde_json::json!({
            "originator": "ARC",
            "volume": "ZZ",
            "level": "01",
            "type": "DR",
            "role": "A",
            "number": "0001"
        }));
        let view = f
            .service
            .create(&ctx(UserRole::Contributor), req)
            .await
            .unwrap();
        assert_eq!(view.container_name.as_deref(), Some("TWR-ARC-ZZ-01-DR-A-0001"));
    }

    #[tokio::test]
    async fn test_certifications() {
        let f = fixture().await;
        let manager = ctx(UserRole::Manager);
        let id = f.service.create(&manager, request("plan")).await.unwrap().document.id;

        f.service
            .add_certification(
                &manager,
                id,
                CertifyRequest {
                    certification_type: "structural".into(),
                    notes: None,
                },
            )
            .await
            .unwrap();
        let certs = f.service.certifications(&manager, id).await.unwrap();
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].certified_by, manager.user_id);

        let filter = ActivityFilter {
            entity_id: Some(id),
            ..Default::default()
        };
        let log = f
            .activity
            .search(&filter, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(log.items[0].action, "document.certify");
    }
}
