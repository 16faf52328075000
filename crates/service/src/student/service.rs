use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument};

use super::domain::{DeleteConfirmation, FieldMap, NewStudent, Student, StudentChanges, StudentFilter};
use super::repository::StudentRepository;
use crate::errors::ServiceError;

const MISSING_EMAIL: &str = "an email must be provided";

/// Student service configuration
#[derive(Clone, Debug)]
pub struct StudentServiceConfig {
    /// Upper bound for one store round-trip; expiry surfaces as `ServiceError::Store`.
    pub store_timeout: Duration,
}

impl Default for StudentServiceConfig {
    fn default() -> Self { Self { store_timeout: Duration::from_secs(5) } }
}

impl From<&configs::DatabaseConfig> for StudentServiceConfig {
    fn from(cfg: &configs::DatabaseConfig) -> Self { Self { store_timeout: cfg.query_timeout() } }
}

/// Student business service independent of web framework.
///
/// Each operation validates its input, then issues exactly one store call.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
    cfg: StudentServiceConfig,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>, cfg: StudentServiceConfig) -> Self { Self { repo, cfg } }

    async fn store_call<T, F>(&self, op: &'static str, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        let res = match tokio::time::timeout(self.cfg.store_timeout, call).await {
            Ok(res) => res,
            Err(_) => Err(ServiceError::Store(format!("{op} timed out after {:?}", self.cfg.store_timeout))),
        };
        if let Err(ServiceError::Store(detail)) = &res {
            error!(op, %detail, "store call failed");
        }
        res
    }

    /// Validate all four fields and persist the record.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, StudentServiceConfig};
    /// use service::student::repository::mock::InMemoryStudentRepository;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(InMemoryStudentRepository::default()), StudentServiceConfig::default());
    /// let body = serde_json::json!({"name": "Ana", "surname": "Lopez", "age": 30, "email": "ana@example.com"});
    /// let student = tokio_test::block_on(svc.create(body.as_object().unwrap())).unwrap();
    /// assert_eq!(student.email, "ana@example.com");
    /// ```
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: &FieldMap) -> Result<Student, ServiceError> {
        let new = NewStudent::from_fields(fields).map_err(ServiceError::Validation)?;
        let stored = self.store_call("insert", self.repo.insert(new)).await?;
        info!(id = %stored.id, email = %stored.email, "student_created");
        Ok(stored)
    }

    /// Every record, or those whose name equals `name` exactly. An empty
    /// result is reported as `NotFound`.
    #[instrument(skip(self))]
    pub async fn query(&self, name: Option<&str>) -> Result<Vec<Student>, ServiceError> {
        let filter = match name {
            Some(name) if !name.is_empty() => StudentFilter::Name(name.to_string()),
            _ => StudentFilter::All,
        };
        let students = self.store_call("find_many", self.repo.find_many(&filter)).await?;
        if students.is_empty() {
            debug!(?filter, "no students matched");
            return Err(ServiceError::not_found("student"));
        }
        Ok(students)
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, email: &str) -> Result<Student, ServiceError> {
        if email.is_empty() {
            return Err(ServiceError::bad_request(MISSING_EMAIL));
        }
        let filter = StudentFilter::Email(email.to_string());
        self.store_call("find_one", self.repo.find_one(&filter))
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))
    }

    /// Partial update addressed by email.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, StudentServiceConfig};
    /// use service::student::repository::mock::InMemoryStudentRepository;
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(InMemoryStudentRepository::default()), StudentServiceConfig::default());
    /// let body = serde_json::json!({"age": 31});
    /// let res = tokio_test::block_on(svc.update(None, body.as_object().unwrap()));
    /// assert!(matches!(res, Err(ServiceError::BadRequest(_))));
    /// ```
    #[instrument(skip(self, changes))]
    pub async fn update(&self, email: Option<&str>, changes: &FieldMap) -> Result<Student, ServiceError> {
        let email = required_email(email)?;
        let changes = StudentChanges::from_fields(changes)?;
        let filter = StudentFilter::Email(email.to_string());
        let updated = self
            .store_call("update_one", self.repo.update_one(&filter, &changes))
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))?;
        info!(id = %updated.id, email = %updated.email, "student_updated");
        Ok(updated)
    }

    /// Remove the record addressed by email. `Ok(None)` when nothing matched.
    #[instrument(skip(self))]
    pub async fn delete(&self, email: Option<&str>) -> Result<Option<DeleteConfirmation>, ServiceError> {
        let email = required_email(email)?;
        let filter = StudentFilter::Email(email.to_string());
        let removed = self.store_call("delete_one", self.repo.delete_one(&filter)).await?;
        match removed {
            Some(student) => {
                info!(id = %student.id, email = %student.email, "student_deleted");
                Ok(Some(student.into()))
            }
            None => {
                debug!(%email, "delete matched no student");
                Ok(None)
            }
        }
    }
}

fn required_email(email: Option<&str>) -> Result<&str, ServiceError> {
    match email {
        Some(email) if !email.is_empty() => Ok(email),
        _ => Err(ServiceError::bad_request(MISSING_EMAIL)),
    }
}
