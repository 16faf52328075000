use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::student::domain::{NewStudent, Student, StudentChanges, StudentFilter};
use crate::student::repository::StudentRepository;

/// SeaORM-backed repository implementation.
///
/// The connection is a pool shared by every request; `update_one` and
/// `delete_one` run their find and write inside one transaction.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn insert(&self, student: NewStudent) -> Result<Student, ServiceError> {
        let created = models::student::create(&self.db, &student.name, &student.surname, student.age, &student.email).await?;
        Ok(created.into())
    }

    async fn find_many(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError> {
        let rows = models::student::find_many(&self.db, filter.to_condition()).await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_one(&self, filter: &StudentFilter) -> Result<Option<Student>, ServiceError> {
        let row = models::student::find_one(&self.db, filter.to_condition()).await?;
        Ok(row.map(Student::from))
    }

    async fn update_one(&self, filter: &StudentFilter, changes: &StudentChanges) -> Result<Option<Student>, ServiceError> {
        let row = models::student::update_one(&self.db, filter.to_condition(), changes.as_patch()).await?;
        Ok(row.map(Student::from))
    }

    async fn delete_one(&self, filter: &StudentFilter) -> Result<Option<Student>, ServiceError> {
        let row = models::student::delete_one(&self.db, filter.to_condition()).await?;
        Ok(row.map(Student::from))
    }
}
