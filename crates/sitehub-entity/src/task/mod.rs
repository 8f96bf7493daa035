//! Task entities.

pub mod model;

pub use model::{CreateTask, Task, TaskStatus, UpdateTask};
