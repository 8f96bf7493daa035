//! # sitehub-database
//!
//! PostgreSQL connection management, migrations and concrete repository
//! implementations for all SiteHub entities. Documents and activity logs
//! are accessed through the [`store`] traits so services can run against
//! the in-memory implementations as well.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
