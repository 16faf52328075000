//! Migrator registering the student schema.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_student;
mod m20240101_000002_add_indexes;
mod m20240101_000003_widen_student_email;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_student::Migration),
            Box::new(m20240101_000002_add_indexes::Migration),
            Box::new(m20240101_000003_widen_student_email::Migration),
        ]
    }
}
