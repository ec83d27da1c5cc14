//! Wire types shared by the dashboard and the logistics REST API.
//!
//! Every DTO mirrors the backend's camelCase JSON verbatim. Nothing here owns
//! a lifecycle: records are fetched, displayed, optionally mutated through
//! one call and discarded.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
