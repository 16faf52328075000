use async_trait::async_trait;

use super::domain::{NewStudent, Student, StudentChanges, StudentFilter};
use crate::errors::ServiceError;

/// Record store abstraction for students.
///
/// Implementations report a duplicate email as [`ServiceError::Conflict`] and
/// transport or availability failures as [`ServiceError::Store`]. An empty
/// result is a value (`None` / empty `Vec`), never an error.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn insert(&self, student: NewStudent) -> Result<Student, ServiceError>;
    async fn find_many(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError>;
    async fn find_one(&self, filter: &StudentFilter) -> Result<Option<Student>, ServiceError>;
    /// Single find-and-update; returns the record as it is after the update.
    async fn update_one(&self, filter: &StudentFilter, changes: &StudentChanges) -> Result<Option<Student>, ServiceError>;
    /// Single find-and-delete; returns the removed record.
    async fn delete_one(&self, filter: &StudentFilter) -> Result<Option<Student>, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct InMemoryStudentRepository {
        students: Mutex<Vec<Student>>,
        unavailable: AtomicBool,
        latency: Option<Duration>,
    }

    impl InMemoryStudentRepository {
        /// Every call sleeps for `latency` before touching the data.
        pub fn with_latency(latency: Duration) -> Self {
            Self { latency: Some(latency), ..Default::default() }
        }

        /// Make every following call fail as if the database were unreachable.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.students.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        async fn round_trip(&self) -> Result<(), ServiceError> {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Store("connection refused".into()));
            }
            Ok(())
        }
    }

    fn duplicate(email: &str) -> ServiceError {
        ServiceError::Conflict(format!("email {email} already exists"))
    }

    #[async_trait]
    impl StudentRepository for InMemoryStudentRepository {
        async fn insert(&self, student: NewStudent) -> Result<Student, ServiceError> {
            self.round_trip().await?;
            let mut students = self.students.lock().unwrap();
            if students.iter().any(|s| s.email == student.email) {
                return Err(duplicate(&student.email));
            }
            let stored = Student {
                id: Uuid::new_v4(),
                name: student.name,
                surname: student.surname,
                age: student.age,
                email: student.email,
            };
            students.push(stored.clone());
            Ok(stored)
        }

        async fn find_many(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError> {
            self.round_trip().await?;
            let students = self.students.lock().unwrap();
            Ok(students.iter().filter(|s| filter.matches(s)).cloned().collect())
        }

        async fn find_one(&self, filter: &StudentFilter) -> Result<Option<Student>, ServiceError> {
            self.round_trip().await?;
            let students = self.students.lock().unwrap();
            Ok(students.iter().find(|s| filter.matches(s)).cloned())
        }

        async fn update_one(&self, filter: &StudentFilter, changes: &StudentChanges) -> Result<Option<Student>, ServiceError> {
            self.round_trip().await?;
            let mut students = self.students.lock().unwrap();
            let Some(idx) = students.iter().position(|s| filter.matches(s)) else {
                return Ok(None);
            };
            if let Some(email) = &changes.email {
                let taken = students
                    .iter()
                    .enumerate()
                    .any(|(i, s)| i != idx && &s.email == email);
                if taken {
                    return Err(duplicate(email));
                }
            }
            changes.apply_to(&mut students[idx]);
            Ok(Some(students[idx].clone()))
        }

        async fn delete_one(&self, filter: &StudentFilter) -> Result<Option<Student>, ServiceError> {
            self.round_trip().await?;
            let mut students = self.students.lock().unwrap();
            let idx = students.iter().position(|s| filter.matches(s));
            Ok(idx.map(|idx| students.remove(idx)))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn new_student(email: &str) -> NewStudent {
            NewStudent { name: "Ana".into(), surname: "Lopez".into(), age: 30, email: email.into() }
        }

        #[tokio::test]
        async fn insert_assigns_identity_and_enforces_unique_email() {
            let repo = InMemoryStudentRepository::default();
            let a = repo.insert(new_student("ana@example.com")).await.unwrap();
            let b = repo.insert(new_student("eva@example.com")).await.unwrap();
            assert_ne!(a.id, b.id);
            let dup = repo.insert(new_student("ana@example.com")).await;
            assert!(matches!(dup, Err(ServiceError::Conflict(_))));
            assert_eq!(repo.len(), 2);
        }

        #[tokio::test]
        async fn update_to_taken_email_is_conflict_and_leaves_record() {
            let repo = InMemoryStudentRepository::default();
            repo.insert(new_student("ana@example.com")).await.unwrap();
            repo.insert(new_student("eva@example.com")).await.unwrap();
            let changes = StudentChanges { email: Some("eva@example.com".into()), ..Default::default() };
            let res = repo.update_one(&StudentFilter::Email("ana@example.com".into()), &changes).await;
            assert!(matches!(res, Err(ServiceError::Conflict(_))));
            let still = repo.find_one(&StudentFilter::Email("ana@example.com".into())).await.unwrap();
            assert!(still.is_some());
        }

        #[tokio::test]
        async fn delete_returns_removed_record_once() {
            let repo = InMemoryStudentRepository::default();
            repo.insert(new_student("ana@example.com")).await.unwrap();
            let filter = StudentFilter::Email("ana@example.com".into());
            assert!(repo.delete_one(&filter).await.unwrap().is_some());
            assert!(repo.delete_one(&filter).await.unwrap().is_none());
            assert!(repo.is_empty());
        }

        #[tokio::test]
        async fn unavailable_store_fails_every_call() {
            let repo = InMemoryStudentRepository::default();
            repo.set_unavailable(true);
            let res = repo.find_many(&StudentFilter::All).await;
            assert!(matches!(res, Err(ServiceError::Store(_))));
        }
    }
}
