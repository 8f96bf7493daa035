//! Construction project entities.

pub mod model;

pub use model::{CreateProject, Project, ProjectStatus, ProjectSummary, UpdateProject};
