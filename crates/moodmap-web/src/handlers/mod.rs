//! HTTP handlers, one module per page group.

pub mod auth;
pub mod dashboard;
pub mod download;
pub mod treemap;
