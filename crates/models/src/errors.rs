use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single field that failed validation, with a user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

pub fn join_fields(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("unique constraint violated: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<FieldError> for ModelError {
    fn from(e: FieldError) -> Self { Self::Validation(vec![e]) }
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = ModelError::Validation(vec![
            FieldError::new("name", "must contain alphabetic characters only"),
            FieldError::new("age", "out of range"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation error: name must contain alphabetic characters only; age out of range"
        );
    }

    #[test]
    fn non_constraint_db_error_maps_to_db() {
        let err: ModelError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ModelError::Db(_)));
    }
}
