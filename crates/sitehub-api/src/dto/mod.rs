//! Data transfer objects for API requests and responses.

pub mod query;
pub mod request;
pub mod response;
