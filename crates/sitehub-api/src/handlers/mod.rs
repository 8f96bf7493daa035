//! HTTP request handlers, one module per resource.

pub mod activity;
pub mod auth;
pub mod calendar;
pub mod comments;
pub mod documents;
pub mod health;
pub mod issues;
pub mod projects;
pub mod tasks;
pub mod uploads;
pub mod users;
pub mod ws;
