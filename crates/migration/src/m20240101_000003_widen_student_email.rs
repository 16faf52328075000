//! Widen `student.email` so the longest address the field rules accept
//! (64-byte local part, `@`, 253-byte domain) is storable.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Student::Table)
                    .modify_column(ColumnDef::new(Student::Email).string_len(320).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Student::Table)
                    .modify_column(ColumnDef::new(Student::Email).string_len(255).not_null())
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Email }
