use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use super::db_tests_enabled;
use crate::db::connect;
use crate::errors::ModelError;
use crate::student::{self, Patch};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn unique_email(tag: &str) -> String {
    format!("{}{}@example.com", tag, Uuid::new_v4().simple())
}

#[tokio::test]
async fn test_student_crud() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let email = unique_email("crud");

    let created = student::create(&db, "Ana", "Lopez", 30, &email).await?;
    assert_eq!(created.email, email);

    let found = student::find_one(&db, student::by_email(&email)).await?.expect("created row");
    assert_eq!(found, created);

    let updated = student::update_one(&db, student::by_email(&email), Patch { age: Some(31), ..Default::default() })
        .await?
        .expect("row to update");
    assert_eq!(updated.age, 31);
    assert_eq!(updated.name, "Ana");

    let deleted = student::delete_one(&db, student::by_email(&email)).await?.expect("row to delete");
    assert_eq!(deleted.id, created.id);
    assert!(student::Entity::find_by_id(created.id).one(&db).await?.is_none());
    assert!(student::delete_one(&db, student::by_email(&email)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let email = unique_email("dup");

    let first = student::create(&db, "Ana", "Lopez", 30, &email).await?;
    let second = student::create(&db, "Eva", "Diaz", 22, &email).await;
    assert!(matches!(second, Err(ModelError::Conflict(_))));

    student::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_age_check_constraint_rejects_out_of_range() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    use sea_orm::{ActiveModelTrait, Set};
    let db = setup_test_db().await?;

    // Bypasses the model validators to reach the table constraint directly.
    let am = student::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Ana".into()),
        surname: Set("Lopez".into()),
        age: Set(101),
        email: Set(unique_email("check")),
    };
    assert!(am.insert(&db).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_list_filters_by_exact_name() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let name = format!("Zed{}", "x".repeat(8));
    let a = student::create(&db, &name, "Alpha", 20, &unique_email("list")).await?;
    let b = student::create(&db, &name, "Beta", 21, &unique_email("list")).await?;

    let rows = student::find_many(&db, student::by_name(&name)).await?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.name == name));
    assert!(student::find_many(&db, student::by_name(&name.to_lowercase())).await?.is_empty());

    student::Entity::delete_by_id(a.id).exec(&db).await?;
    student::Entity::delete_by_id(b.id).exec(&db).await?;
    Ok(())
}

/// Unique address of exactly `MAX_EMAIL_LEN` bytes.
fn longest_email() -> String {
    let local = format!("{:a<64}", Uuid::new_v4().simple().to_string());
    let domain = format!("{}.{}.{}.{}", "b".repeat(63), "c".repeat(63), "d".repeat(63), "e".repeat(61));
    format!("{local}@{domain}")
}

#[tokio::test]
async fn test_longest_accepted_values_are_stored() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let email = longest_email();
    assert_eq!(email.len(), crate::validation::MAX_EMAIL_LEN);
    let name = "é".repeat(crate::validation::MAX_NAME_CHARS);

    let created = student::create(&db, &name, &"L".repeat(128), 100, &email).await?;
    assert_eq!(created.name.chars().count(), 128);
    assert_eq!(created.email, email);

    student::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_overlong_name_is_validation_not_db_error() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let res = student::create(&db, &"A".repeat(129), "Lopez", 30, &unique_email("long")).await;
    assert!(matches!(res, Err(ModelError::Validation(ref errs)) if errs[0].field == "name"));
    Ok(())
}
