use sea_orm::{entity::prelude::*, Condition, DatabaseConnection, QueryFilter, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FieldError, ModelError};
use crate::validation;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub age: i32,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Columns an update may touch. `None` leaves the stored value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch<'a> {
    pub name: Option<&'a str>,
    pub surname: Option<&'a str>,
    pub age: Option<i32>,
    pub email: Option<&'a str>,
}

impl Patch<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.surname.is_none() && self.age.is_none() && self.email.is_none()
    }

    /// Same rules as an insert, applied to the columns being changed.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut errors: Vec<FieldError> = Vec::new();
        if let Some(name) = self.name {
            errors.extend(validation::validate_name(name).err());
        }
        if let Some(surname) = self.surname {
            errors.extend(validation::validate_surname(surname).err());
        }
        if let Some(age) = self.age {
            errors.extend(validation::validate_age(i64::from(age)).err());
        }
        if let Some(email) = self.email {
            errors.extend(validation::validate_email(email).err());
        }
        if errors.is_empty() { Ok(()) } else { Err(ModelError::Validation(errors)) }
    }
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    surname: &str,
    age: i32,
    email: &str,
) -> Result<Model, ModelError> {
    Patch { name: Some(name), surname: Some(surname), age: Some(age), email: Some(email) }.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        surname: Set(surname.to_string()),
        age: Set(age),
        email: Set(email.to_string()),
    };
    Ok(am.insert(db).await?)
}

pub fn by_email(email: &str) -> Condition {
    Condition::all().add(Column::Email.eq(email))
}

pub fn by_name(name: &str) -> Condition {
    Condition::all().add(Column::Name.eq(name))
}

pub async fn find_one(db: &DatabaseConnection, condition: Condition) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(condition).one(db).await?)
}

/// Rows matching `condition`; an empty `Condition::all()` matches every row.
pub async fn find_many(db: &DatabaseConnection, condition: Condition) -> Result<Vec<Model>, ModelError> {
    let rows = Entity::find()
        .filter(condition)
        .order_by_asc(Column::Surname)
        .order_by_asc(Column::Name)
        .all(db)
        .await?;
    Ok(rows)
}

/// Find-and-update in one transaction. Returns the post-update row, or
/// `None` when nothing matches.
pub async fn update_one(
    db: &DatabaseConnection,
    condition: Condition,
    patch: Patch<'_>,
) -> Result<Option<Model>, ModelError> {
    patch.validate()?;
    let txn = db.begin().await?;
    let Some(found) = Entity::find().filter(condition).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(None);
    };
    if patch.is_empty() {
        txn.commit().await?;
        return Ok(Some(found));
    }

    let mut am: ActiveModel = found.into();
    if let Some(name) = patch.name {
        am.name = Set(name.to_string());
    }
    if let Some(surname) = patch.surname {
        am.surname = Set(surname.to_string());
    }
    if let Some(age) = patch.age {
        am.age = Set(age);
    }
    if let Some(email) = patch.email {
        am.email = Set(email.to_string());
    }
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    Ok(Some(updated))
}

/// Find-and-delete in one transaction. Returns the removed row.
pub async fn delete_one(db: &DatabaseConnection, condition: Condition) -> Result<Option<Model>, ModelError> {
    let txn = db.begin().await?;
    let Some(found) = Entity::find().filter(condition).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(None);
    };
    Entity::delete_by_id(found.id).exec(&txn).await?;
    txn.commit().await?;
    Ok(Some(found))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_validation_collects_every_bad_field() {
        let patch = Patch { name: Some("An4"), surname: Some("Lopez"), age: Some(140), email: Some("nope") };
        match patch.validate() {
            Err(ModelError::Validation(errs)) => {
                let fields: Vec<_> = errs.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["name", "age", "email"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_patch_is_valid() {
        let patch = Patch::default();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());
    }
}
