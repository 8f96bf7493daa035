//! Core traits defined in `sitehub-core` and implemented by other crates.

pub mod publisher;
pub mod storage;

pub use publisher::{EventPublisher, NoopPublisher};
pub use storage::StorageProvider;
