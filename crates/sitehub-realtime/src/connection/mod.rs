//! Connection handles and the registry that tracks them.

pub mod handle;
pub mod pool;
