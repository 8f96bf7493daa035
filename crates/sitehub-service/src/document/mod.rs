//! Document lifecycle: records, uploads, history, approval, certification.

pub mod service;
pub mod upload;
pub mod view;

pub use service::{CertifyRequest, CreateDocumentRequest, DocumentService};
pub use upload::{FilePart, UploadDocumentRequest};
pub use view::DocumentView;
