//! Student records: three-layer architecture (domain, repository, service).
//!
//! The repository is the record store seam; the service owns validation and
//! the create/query/lookup/update/delete contracts.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::{StudentService, StudentServiceConfig};
