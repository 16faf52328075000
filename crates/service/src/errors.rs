use models::errors::{join_fields, FieldError, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn bad_request(reason: impl Into<String>) -> Self { Self::BadRequest(reason.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::BadRequest(_) => 1003,
            ServiceError::NotFound(_) => 1004,
            ServiceError::Store(_) => 1200,
        }
    }

    /// Whether the failure is the caller's to fix (4xx) rather than the server's.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Store(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(errs) => ServiceError::Validation(errs),
            ModelError::Conflict(msg) => ServiceError::Conflict(msg),
            ModelError::Db(msg) => ServiceError::Store(msg),
        }
    }
}

impl From<FieldError> for ServiceError {
    fn from(e: FieldError) -> Self { ServiceError::Validation(vec![e]) }
}
