//! Activity log entities.

pub mod model;

pub use model::{ActivityFilter, ActivityLog, NewActivity};
