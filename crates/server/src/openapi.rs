use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub email: String,
}

#[derive(ToSchema)]
pub struct NewStudentDoc {
    /// Alphabetic characters only
    pub name: String,
    /// Alphabetic characters only
    pub surname: String,
    /// 0 to 100 inclusive
    pub age: i32,
    /// Unique across all records
    pub email: String,
}

/// Any subset of the four fields; other keys are rejected.
#[derive(ToSchema)]
pub struct StudentChangesDoc {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub reason: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    pub message: Option<String>,
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::create,
        crate::routes::students::list_or_lookup,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            StudentDoc,
            NewStudentDoc,
            StudentChangesDoc,
            FieldErrorDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
