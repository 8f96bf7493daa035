//! # sitehub-storage
//!
//! Pass-through storage for uploaded document files. Files are written to
//! a local directory under generated keys and served back at
//! `/uploads/<key>`.

pub mod keys;
pub mod local;

pub use keys::{UploadKey, content_type_for, public_url};
pub use local::LocalStorageProvider;
