//! Create `student` table.
//!
//! Email is the external key and carries the unique constraint; age is
//! bounded by a check constraint so updates are re-validated by the store too.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(uuid(Student::Id).primary_key())
                    .col(string_len(Student::Name, 128).not_null())
                    .col(string_len(Student::Surname, 128).not_null())
                    .col(
                        integer(Student::Age)
                            .not_null()
                            .check(Expr::col(Student::Age).between(0, 100)),
                    )
                    .col(string_len(Student::Email, 255).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, Name, Surname, Age, Email }
