//! Document handlers: registration, uploads, history, approval and certifications.

use std::collections::HashMap;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use sitehub_core::error::AppError;
use sitehub_core::types::PageResponse;
use sitehub_entity::document::{Certification, DocumentHistory, DocumentStatus};
use sitehub_service::DocumentView;
use sitehub_service::document::{FilePart, UploadDocumentRequest};

use crate::dto::query::DocumentListQuery;
use crate::dto::request::{
    CertifyRequest, CreateDocumentRequest, RestoreRequest, UpdateDocumentRequest,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, PaginationParams, ValidJson};
use crate::state::AppState;

/// A parsed multipart body: the `file` part plus every text field.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<FilePart>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parsed<T>(&self, name: &str) -> Result<Option<T>, AppError>
    where
        T: std::str::FromStr,
    {
        self.text(name)
            .map(|v| {
                v.parse::<T>()
                    .map_err(|_| AppError::validation(format!("Invalid {name}")))
            })
            .transpose()
    }

    fn metadata(&self) -> Result<Option<serde_json::Value>, AppError> {
        self.text("metadata")
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| AppError::validation(format!("metadata is not valid JSON: {e}")))
            })
            .transpose()
    }

    fn take_file(&mut self) -> Result<FilePart, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::validation("file is required"))
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Upload exceeds the configured size limit")
    } else {
        AppError::validation(format!("Multipart error: {e}"))
    }
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let data = field.bytes().await.map_err(multipart_error)?;
            form.file = Some(FilePart { file_name, data });
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<PageResponse<DocumentView>>, ApiError> {
    let documents = state
        .document_service
        .list(&auth, &query.into(), params.into_page_request())
        .await?;
    Ok(Json(documents))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<DocumentView>, ApiError> {
    let document = state.document_service.get(&auth, id).await?;
    Ok(Json(document))
}

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentView>), ApiError> {
    let document = state.document_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// POST /api/documents/upload (multipart: `file` plus optional
/// `name`, `project_id`, `status`, `category`, `metadata`)
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentView>), ApiError> {
    let mut form = read_form(multipart).await?;

    let req = UploadDocumentRequest {
        name: form.text("name"),
        project_id: form.parsed::<Uuid>("project_id")?,
        status: form.parsed::<DocumentStatus>("status")?,
        category: form.text("category"),
        metadata: form.metadata()?,
        file: form.take_file()?,
    };

    let document = state.document_service.upload(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateDocumentRequest>,
) -> Result<Json<DocumentView>, ApiError> {
    let document = state
        .document_service
        .update(&auth, id, req.into())
        .await?;
    Ok(Json(document))
}

/// POST /api/documents/{id}/revisions (multipart: `file`)
pub async fn upload_revision(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    multipart: Multipart,
) -> Result<Json<DocumentView>, ApiError> {
    let mut form = read_form(multipart).await?;
    let file = form.take_file()?;
    let document = state
        .document_service
        .upload_revision(&auth, id, file)
        .await?;
    Ok(Json(document))
}

/// DELETE /api/documents/{id}
///
/// Returns the `delete` history row so clients can offer an undo.
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<DocumentHistory>, ApiError> {
    let history = state.document_service.delete(&auth, id).await?;
    Ok(Json(history))
}

/// GET /api/documents/{id}/history
pub async fn document_history(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Vec<DocumentHistory>>, ApiError> {
    let history = state.document_service.history(&auth, id).await?;
    Ok(Json(history))
}

/// POST /api/documents/restore
pub async fn restore_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<RestoreRequest>,
) -> Result<Json<DocumentView>, ApiError> {
    let document = state
        .document_service
        .restore(&auth, req.history_id)
        .await?;
    Ok(Json(document))
}

/// POST /api/documents/{id}/approve
pub async fn approve_document(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<DocumentView>, ApiError> {
    let document = state.document_service.approve(&auth, id).await?;
    Ok(Json(document))
}

/// GET /api/documents/{id}/certifications
pub async fn list_certifications(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Vec<Certification>>, ApiError> {
    let certifications = state.document_service.certifications(&auth, id).await?;
    Ok(Json(certifications))
}

/// POST /api/documents/{id}/certifications
pub async fn add_certification(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<CertifyRequest>,
) -> Result<(StatusCode, Json<Certification>), ApiError> {
    let certification = state
        .document_service
        .add_certification(&auth, id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(certification)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> UploadForm {
        UploadForm {
            file: None,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let f = form(&[("name", "  "), ("category", "Drawings")]);
        assert_eq!(f.text("name"), None);
        assert_eq!(f.text("category").as_deref(), Some("Drawings"));
    }

    #[test]
    fn test_status_field_parses_case_insensitively() {
        let f = form(&[("status", "shared")]);
        assert_eq!(
            f.parsed::<DocumentStatus>("status").unwrap(),
            Some(DocumentStatus::Shared)
        );
    }

    #[test]
    fn test_bad_project_id_is_a_validation_error() {
        let f = form(&[("project_id", "nope")]);
        assert!(f.parsed::<Uuid>("project_id").is_err());
    }

    #[test]
    fn test_metadata_must_be_json() {
        assert!(form(&[("metadata", "{oops")]).metadata().is_err());
        let ok = form(&[("metadata", r#"{"originator":"ARC"}"#)])
            .metadata()
            .unwrap();
        assert_eq!(ok.unwrap()["originator"], "ARC");
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let mut f = form(&[]);
        assert!(f.take_file().is_err());
    }
}
