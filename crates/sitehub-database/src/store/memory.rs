//! In-memory store implementations.
//!
//! Used by service tests and by embedders that do not need persistence.
//! Each store keeps all state behind one lock so a live-row write and its
//! history append are observed together.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_entity::activity::{ActivityFilter, ActivityLog, NewActivity};
use sitehub_entity::document::{
    Certification, Document, DocumentChanges, DocumentHistory, DocumentStatus, HistoryAction,
    NewCertification, NewDocument,
};

use super::{ActivityStore, DocumentFilter, DocumentStore, Recorded};

#[derive(Debug, Default)]
struct DocumentState {
    documents: HashMap<Uuid, Document>,
    history: Vec<DocumentHistory>,
    certifications: Vec<Certification>,
    project_codes: HashMap<Uuid, String>,
}

/// Document store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: RwLock<DocumentState>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a project code known to [`DocumentStore::project_code`].
    pub async fn register_project(&self, project_id: Uuid, code: impl Into<String>) {
        self.state
            .write()
            .await
            .project_codes
            .insert(project_id, code.into());
    }
}

pub(super) fn paginate<T: Clone + serde::Serialize>(
    items: &[T],
    page: &PageRequest,
) -> PageResponse<T> {
    let total = items.len() as u64;
    let slice = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    PageResponse::new(slice, page.page, page.page_size, total)
}

fn document_not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Document {id} not found"))
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(
        &self,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let state = self.state.read().await;
        let mut matching: Vec<Document> = state
            .documents
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(paginate(&matching, page))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }

    async fn create(&self, data: NewDocument, actor_id: Option<Uuid>) -> AppResult<Recorded> {
        let document = data.into_document();
        let history = DocumentHistory::snapshot(&document, HistoryAction::Upload, actor_id);

        let mut state = self.state.write().await;
        state.documents.insert(document.id, document.clone());
        state.history.push(history.clone());
        Ok(Recorded { document, history })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &DocumentChanges,
        actor_id: Option<Uuid>,
    ) -> AppResult<Recorded> {
        let mut state = self.state.write().await;
        let document = state
            .documents
            .get_mut(&id)
            .ok_or_else(|| document_not_found(id))?;
        changes.apply_to(document);
        let document = document.clone();

        let history = DocumentHistory::snapshot(&document, HistoryAction::Update, actor_id);
        state.history.push(history.clone());
        Ok(Recorded { document, history })
    }

    async fn delete(&self, id: Uuid, actor_id: Option<Uuid>) -> AppResult<DocumentHistory> {
        let mut state = self.state.write().await;
        let document = state
            .documents
            .get(&id)
            .ok_or_else(|| document_not_found(id))?;

        let history = DocumentHistory::snapshot(document, HistoryAction::Delete, actor_id);
        state.history.push(history.clone());
        state.documents.remove(&id);
        state.certifications.retain(|c| c.document_id != id);
        Ok(history)
    }

    async fn restore(&self, history_id: Uuid, actor_id: Option<Uuid>) -> AppResult<Recorded> {
        let mut state = self.state.write().await;
        let entry = state
            .history
            .iter()
            .find(|h| h.id == history_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("History entry {history_id} not found")))?;

        let document = state
            .documents
            .get_mut(&entry.document_id)
            .ok_or_else(|| document_not_found(entry.document_id))?;
        document.restore_from(&entry);
        let document = document.clone();

        let history = DocumentHistory::snapshot(&document, HistoryAction::Restore, actor_id);
        state.history.push(history.clone());
        Ok(Recorded { document, history })
    }

    async fn history(&self, document_id: Uuid) -> AppResult<Vec<DocumentHistory>> {
        let state = self.state.read().await;
        Ok(state
            .history
            .iter()
            .rev()
            .filter(|h| h.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn add_certification(&self, data: NewCertification) -> AppResult<Certification> {
        let mut state = self.state.write().await;
        if !state.documents.contains_key(&data.document_id) {
            return Err(document_not_found(data.document_id));
        }
        let certification = Certification {
            id: Uuid::new_v4(),
            document_id: data.document_id,
            certification_type: data.certification_type,
            notes: data.notes,
            certified_by: data.certified_by,
            certified_at: Utc::now(),
        };
        state.certifications.push(certification.clone());
        Ok(certification)
    }

    async fn certifications(&self, document_id: Uuid) -> AppResult<Vec<Certification>> {
        let state = self.state.read().await;
        Ok(state
            .certifications
            .iter()
            .rev()
            .filter(|c| c.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, project_id: Uuid) -> AppResult<Vec<(DocumentStatus, i64)>> {
        let state = self.state.read().await;
        Ok(DocumentStatus::ALL
            .iter()
            .map(|status| {
                let n = state
                    .documents
                    .values()
                    .filter(|d| d.project_id == Some(project_id) && d.status == *status)
                    .count() as i64;
                (*status, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect())
    }

    async fn project_code(&self, project_id: Uuid) -> AppResult<Option<String>> {
        Ok(self.state.read().await.project_codes.get(&project_id).cloned())
    }
}

/// Activity store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    entries: RwLock<Vec<ActivityLog>>,
}

impl MemoryActivityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn append(&self, data: NewActivity) -> AppResult<ActivityLog> {
        let entry = data.into_entry();
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn search(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityLog>> {
        let entries = self.entries.read().await;
        let matching: Vec<ActivityLog> = entries
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        Ok(paginate(&matching, page))
    }
}
