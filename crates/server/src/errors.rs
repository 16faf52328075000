use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::FieldError;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "message": <detail>, "fields": [...]}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
    pub fields: Option<Vec<FieldError>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message, fields: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.title,
            message: self.message.as_deref(),
            fields: self.fields.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(fields) => {
                let message = models::errors::join_fields(&fields);
                Self {
                    status: StatusCode::BAD_REQUEST,
                    title: "Validation Error",
                    message: Some(message),
                    fields: Some(fields),
                }
            }
            ServiceError::BadRequest(reason) => Self::bad_request(reason),
            ServiceError::Conflict(detail) => Self::new(StatusCode::CONFLICT, "Conflict", Some(detail)),
            ServiceError::NotFound(detail) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail)),
            ServiceError::Store(detail) => {
                error!(code = 1200, %detail, "store failure answered with 500");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Store Error", Some("the record store is unavailable".into()))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("bind {addr} failed: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
