use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use service::student::domain::FieldMap;
use service::student::repo::seaorm::SeaOrmStudentRepository;
use service::student::repository::StudentRepository;
use service::student::{StudentService, StudentServiceConfig};

use crate::errors::JsonApiError;
use crate::observability;

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<StudentService<dyn StudentRepository>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn StudentRepository>, cfg: StudentServiceConfig) -> Self {
        Self { students: Arc::new(StudentService::new(repo, cfg)) }
    }

    /// Production wiring over a SeaORM pool.
    pub fn seaorm(db: DatabaseConnection, cfg: &configs::DatabaseConfig) -> Self {
        Self::new(Arc::new(SeaOrmStudentRepository::new(db)), cfg.into())
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQuery {
    /// Exact, case-sensitive name filter
    pub name: Option<String>,
    /// Fetch the single record with this email
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email of the record to address
    pub email: Option<String>,
}

fn object_body(payload: Result<Json<Value>, JsonRejection>) -> Result<FieldMap, JsonApiError> {
    match payload {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(JsonApiError::bad_request("request body must be a JSON object")),
        Err(rejection) => Err(JsonApiError::bad_request(rejection.body_text())),
    }
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::NewStudentDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Email already exists", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let fields = object_body(payload)?;
    let res = state.students.create(&fields).await;
    observability::record("create", &res);
    let student = res?;
    Ok((StatusCode::CREATED, Json(student)).into_response())
}

/// Lookup when `email` is given, otherwise the (optionally name-filtered) list.
#[utoipa::path(
    get, path = "/students", tag = "students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Matching records; a single object for an email lookup", body = [crate::openapi::StudentDoc]),
        (status = 404, description = "No record matched", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_or_lookup(
    State(state): State<AppState>,
    Query(q): Query<StudentQuery>,
) -> Result<Response, JsonApiError> {
    match q.email.as_deref() {
        Some(email) if !email.is_empty() => {
            let res = state.students.lookup(email).await;
            observability::record("lookup", &res);
            Ok(Json(res?).into_response())
        }
        _ => {
            let res = state.students.query(q.name.as_deref()).await;
            observability::record("query", &res);
            let students = res?;
            info!(count = students.len(), "list students");
            Ok(Json(students).into_response())
        }
    }
}

#[utoipa::path(
    patch, path = "/students", tag = "students",
    params(EmailQuery),
    request_body = crate::openapi::StudentChangesDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentDoc),
        (status = 400, description = "Missing email, disallowed field or invalid value", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 409, description = "Email already exists", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Query(q): Query<EmailQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    // A missing email wins over a malformed body.
    let email = q.email.as_deref().filter(|e| !e.is_empty());
    let changes = match (email, object_body(payload)) {
        (Some(_), Err(e)) => return Err(e),
        (_, body) => body.unwrap_or_default(),
    };
    let res = state.students.update(email, &changes).await;
    observability::record("update", &res);
    Ok(Json(res?).into_response())
}

#[utoipa::path(
    delete, path = "/students", tag = "students",
    params(EmailQuery),
    responses(
        (status = 201, description = "Deleted; plain text `<name> <surname> deleted`", body = String, content_type = "text/plain"),
        (status = 204, description = "No record matched"),
        (status = 400, description = "Missing email", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Query(q): Query<EmailQuery>,
) -> Result<Response, JsonApiError> {
    let res = state.students.delete(q.email.as_deref()).await;
    observability::record("delete", &res);
    match res? {
        Some(confirmation) => Ok((StatusCode::CREATED, confirmation.to_string()).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
