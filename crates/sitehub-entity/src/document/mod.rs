//! Document entities: the live record, its append-only history,
//! certifications and ISO 19650 naming.

pub mod certification;
pub mod history;
pub mod model;
pub mod naming;
pub mod status;

pub use certification::{Certification, NewCertification};
pub use history::{DocumentHistory, HistoryAction};
pub use model::{Document, DocumentChanges, NewDocument};
pub use naming::Iso19650Name;
pub use status::DocumentStatus;
